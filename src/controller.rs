//! Window controller: applies the view's window requests to the surface, owns
//! the popup context menu, and reports menu picks and size changes back.

use crate::geometry::MIN_WINDOW;
use crate::menu::{PopupMenu, PopupOutcome, build_menu};
use crate::messages::{ControllerEvent, MenuAction, MenuState, Outbox, ViewRequest};
use crate::surface::WindowSurface;
use crate::types::FrameBuffer;

pub struct WindowController<S: WindowSurface> {
    surface: S,
    events: Outbox<ControllerEvent>,
    popup: Option<PopupMenu>,
    last_pointer: (f64, f64),
    click_through: bool,
    quit: bool,
    padding: u32,
    default_bubble: u32,
}

impl<S: WindowSurface> WindowController<S> {
    pub fn new(surface: S, events: Outbox<ControllerEvent>, padding: u32, default_bubble: u32) -> Self {
        Self {
            surface,
            events,
            popup: None,
            last_pointer: (0.0, 0.0),
            click_through: false,
            quit: false,
            padding,
            default_bubble,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn menu_open(&self) -> bool {
        self.popup.is_some()
    }

    pub fn click_through(&self) -> bool {
        self.click_through
    }

    pub fn handle_request(&mut self, request: ViewRequest) {
        match request {
            ViewRequest::MoveWindow { dx, dy } => self.move_by(dx, dy),
            ViewRequest::ResizeWindow { width, height } => self.resize_to(width, height),
            ViewRequest::ShowContextMenu { state } => self.show_context_menu(&state),
            ViewRequest::SetClickThrough { enabled } => self.set_click_through(enabled),
        }
    }

    /// Additive move. Screen bounds are the window manager's business.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        if !(dx.is_finite() && dy.is_finite()) {
            tracing::debug!(dx, dy, "ignoring invalid move");
            return;
        }
        let (x, y) = self.surface.position();
        self.surface.set_position(x + dx.round() as i32, y + dy.round() as i32);
    }

    /// Absolute resize, at least [`MIN_WINDOW`] per axis.
    pub fn resize_to(&mut self, width: f64, height: f64) {
        if !(width.is_finite() && height.is_finite()) || width == 0.0 || height == 0.0 {
            tracing::debug!(width, height, "ignoring invalid resize");
            return;
        }
        let w = width.round().max(MIN_WINDOW as f64) as u32;
        let h = height.round().max(MIN_WINDOW as f64) as u32;
        self.surface.set_size(w, h);
        // Some platforms repaint an opaque background after a geometry change.
        self.surface.reassert_transparency();
        tracing::debug!(width = w, height = h, "window resized");
    }

    pub fn show_context_menu(&mut self, state: &MenuState) {
        let anchor = (self.last_pointer.0 as i32, self.last_pointer.1 as i32);
        self.popup = Some(PopupMenu::new(build_menu(state), anchor));
    }

    pub fn set_click_through(&mut self, enabled: bool) {
        self.click_through = enabled;
        if let Err(e) = self.surface.set_click_through(enabled) {
            tracing::warn!("{e}");
        }
    }

    /// Stand-in for the tray's reset entry: default size, then tell the view.
    pub fn reset_size(&mut self) {
        let side = self.default_bubble as f64;
        let padding = self.padding as f64;
        self.resize_to(side + padding, side + padding);
        self.events.send(ControllerEvent::SizeResync { width: side, height: side });
    }

    pub fn close_menu(&mut self) {
        self.popup = None;
    }

    pub fn request_quit(&mut self) {
        tracing::info!("quit requested");
        self.quit = true;
    }

    /// Remember where the pointer is so the next popup opens there.
    pub fn track_pointer(&mut self, local: (f64, f64)) {
        self.last_pointer = local;
        let view = self.view_size();
        if let Some(popup) = self.popup.as_mut() {
            popup.hover(local.0, local.1, view);
        }
    }

    /// Route a click to the open popup. Returns false if no popup was open.
    pub fn menu_click(&mut self, local: (f64, f64)) -> bool {
        let view = self.view_size();
        let Some(popup) = self.popup.as_mut() else {
            return false;
        };
        match popup.click(local.0, local.1, view) {
            PopupOutcome::Stay => {}
            PopupOutcome::Dismiss => self.popup = None,
            PopupOutcome::Selected(action) => {
                self.popup = None;
                self.dispatch(action);
            }
        }
        true
    }

    fn dispatch(&mut self, action: MenuAction) {
        tracing::debug!(?action, "menu action");
        if action == MenuAction::Quit {
            self.request_quit();
            return;
        }
        self.events.send(ControllerEvent::MenuAction { action });
    }

    fn view_size(&self) -> (i32, i32) {
        let (w, h) = self.surface.size();
        (w as i32, h as i32)
    }

    /// Draw the popup (if any) on top of the rendered bubble.
    pub fn overlay(&self, canvas: &mut FrameBuffer) {
        if let Some(popup) = &self.popup {
            popup.render(canvas);
        }
    }
}
