//! The bubble view: owns the bubble state, the gesture state machine and the
//! camera session, and talks to the window controller only through messages.

use serde::{Deserialize, Serialize};

use crate::camera::{CameraSession, CameraStatus, CaptureBackend};
use crate::geometry::{Bounds, Geometry};
use crate::input::{Button, Shortcut};
use crate::interaction::Interaction;
use crate::messages::{CameraEntry, ControllerEvent, MenuAction, MenuState, Outbox, ViewRequest};
use crate::render::{BubbleStyle, render_bubble};
use crate::shape::{BorderTheme, ShapeMode, ShapePreset, SizePreset};
use crate::types::{FrameBuffer, Rect};

const GROW: f64 = 1.1;
const SHRINK: f64 = 0.9;

/// Which flavour of the widget to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Presets only.
    Fixed,
    /// Edge resizing, custom shapes, scale shortcuts.
    Fluid,
    /// Fluid plus border themes.
    #[default]
    Themed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    pub edge_resize: bool,
    pub custom_shape: bool,
    pub scale_shortcuts: bool,
    pub border_themes: bool,
}

impl Variant {
    pub fn features(self) -> Features {
        match self {
            Variant::Fixed => Features {
                edge_resize: false,
                custom_shape: false,
                scale_shortcuts: false,
                border_themes: false,
            },
            Variant::Fluid => Features {
                edge_resize: true,
                custom_shape: true,
                scale_shortcuts: true,
                border_themes: false,
            },
            Variant::Themed => Features {
                edge_resize: true,
                custom_shape: true,
                scale_shortcuts: true,
                border_themes: true,
            },
        }
    }
}

/// Everything about the bubble that is not a transient gesture. Every setter
/// returns the next state and leaves `self` untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleState {
    pub geometry: Geometry,
    pub shape: ShapeMode,
    /// Last applied size preset, the starting point for cycling.
    pub size: Option<SizePreset>,
    pub mirrored: bool,
    pub border: BorderTheme,
    pub click_through: bool,
}

impl BubbleState {
    pub fn new(shape: ShapeMode, size: SizePreset, mirrored: bool, border: BorderTheme, bounds: &Bounds) -> Self {
        let geometry = Geometry::square(size.target(), bounds);
        let state = Self { geometry, shape, size: Some(size), mirrored, border, click_through: false };
        match shape {
            ShapeMode::Preset(p) => state.with_shape(p, bounds),
            ShapeMode::Custom => state,
        }
    }

    pub fn radius_pct(&self) -> f64 {
        self.shape.radius_pct(&self.geometry)
    }

    /// Canonical geometry update. Preset shapes stay square.
    pub fn with_geometry(self, width: f64, height: f64, bounds: &Bounds) -> Self {
        let mut geometry = self.geometry.set(width, height, bounds);
        if self.shape.preset().is_some() {
            geometry = geometry.squared(bounds);
        }
        Self { geometry, ..self }
    }

    pub fn with_shape(self, preset: ShapePreset, bounds: &Bounds) -> Self {
        Self { geometry: self.geometry.squared(bounds), shape: ShapeMode::Preset(preset), ..self }
    }

    pub fn with_custom(self) -> Self {
        Self { shape: ShapeMode::Custom, ..self }
    }

    pub fn with_size(self, size: SizePreset, bounds: &Bounds) -> Self {
        let g = self.geometry.fit_longest(size.target(), bounds);
        Self { size: Some(size), ..self.with_geometry(g.width as f64, g.height as f64, bounds) }
    }

    pub fn scaled(self, factor: f64, bounds: &Bounds) -> Self {
        let g = self.geometry.scaled(factor, bounds);
        self.with_geometry(g.width as f64, g.height as f64, bounds)
    }

    pub fn with_mirror(self, mirrored: bool) -> Self {
        Self { mirrored, ..self }
    }

    pub fn with_border(self, border: BorderTheme) -> Self {
        Self { border, ..self }
    }

    pub fn with_click_through(self, click_through: bool) -> Self {
        Self { click_through, ..self }
    }
}

/// Tunables shared by the view's handlers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub bounds: Bounds,
    pub padding: u32,
    pub edge_threshold: f64,
}

pub struct BubbleView<B: CaptureBackend> {
    state: BubbleState,
    interaction: Interaction,
    features: Features,
    limits: Limits,
    camera: CameraSession<B>,
    last_frame: Option<FrameBuffer>,
    outbox: Outbox<ViewRequest>,
}

impl<B: CaptureBackend> BubbleView<B> {
    pub fn new(
        state: BubbleState,
        variant: Variant,
        limits: Limits,
        camera: CameraSession<B>,
        outbox: Outbox<ViewRequest>,
    ) -> Self {
        let features = variant.features();
        // Even padding keeps the canvas and the reported window size identical.
        let limits = Limits { padding: limits.padding / 2 * 2, ..limits };
        let state = if features.custom_shape { state } else { Self::force_preset(state, &limits.bounds) };
        let state = if features.border_themes { state } else { state.with_border(BorderTheme::None) };
        Self { state, interaction: Interaction::Idle, features, limits, camera, last_frame: None, outbox }
    }

    fn force_preset(state: BubbleState, bounds: &Bounds) -> BubbleState {
        match state.shape {
            ShapeMode::Preset(_) => state,
            ShapeMode::Custom => state.with_shape(ShapePreset::Circle, bounds),
        }
    }

    pub fn state(&self) -> &BubbleState {
        &self.state
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn camera(&self) -> &CameraSession<B> {
        &self.camera
    }

    /// Window size matching the current bubble.
    pub fn window_size(&self) -> (u32, u32) {
        self.state.geometry.window_size(self.limits.padding)
    }

    /// Start the camera and tell the controller how big the window should be.
    pub fn start(&mut self) -> CameraStatus {
        let status = self.camera.initialize();
        let (w, h) = self.window_size();
        self.outbox.send(ViewRequest::ResizeWindow { width: w as f64, height: h as f64 });
        status
    }

    /// Replace the state, asking for a window resize if the geometry moved.
    fn commit(&mut self, next: BubbleState) {
        let resized = next.geometry != self.state.geometry;
        self.state = next;
        if resized {
            let (w, h) = self.window_size();
            tracing::debug!(width = next.geometry.width, height = next.geometry.height, "bubble resized");
            self.outbox.send(ViewRequest::ResizeWindow { width: w as f64, height: h as f64 });
        }
    }

    fn bubble_rect(&self) -> Rect {
        let inset = (self.limits.padding / 2) as f64;
        Rect {
            x: inset,
            y: inset,
            width: self.state.geometry.width as f64,
            height: self.state.geometry.height as f64,
        }
    }

    /// Is a window-local point inside the logical bubble window?
    fn in_window(&self, local: (f64, f64)) -> bool {
        let (w, h) = self.window_size();
        local.0 >= 0.0 && local.1 >= 0.0 && local.0 < w as f64 && local.1 < h as f64
    }

    pub fn pointer_down(&mut self, button: Button, local: (f64, f64), screen: (f64, f64)) {
        if self.state.click_through {
            return;
        }
        // The OS window is larger than the bubble window; presses past it are not ours.
        if !self.in_window(local) {
            tracing::trace!(x = local.0, y = local.1, "press outside bubble window");
            return;
        }
        match button {
            Button::Left => {
                self.interaction = Interaction::begin(
                    local,
                    screen,
                    &self.bubble_rect(),
                    self.state.geometry,
                    self.limits.edge_threshold,
                    self.features.edge_resize,
                );
                tracing::trace!(interaction = ?self.interaction, "pointer down");
            }
            Button::Right => {
                self.interaction.pointer_up();
                self.outbox.send(ViewRequest::ShowContextMenu { state: self.menu_state() });
            }
        }
    }

    pub fn pointer_move(&mut self, screen: (f64, f64)) {
        if self.state.click_through {
            return;
        }
        let step = self.interaction.pointer_move(screen, &self.limits.bounds);
        if let Some(geometry) = step.geometry {
            // Reshaping by hand leaves preset mode.
            let next = BubbleState { geometry, ..self.state.with_custom() };
            self.commit(next);
        }
        if let Some((dx, dy)) = step.move_by {
            self.outbox.send(ViewRequest::MoveWindow { dx: dx as f64, dy: dy as f64 });
        }
    }

    /// Only the left button drives drags and resizes, so only its release ends one.
    pub fn pointer_up(&mut self, button: Button) {
        if button == Button::Left {
            self.interaction.pointer_up();
        }
    }

    pub fn handle_shortcut(&mut self, shortcut: Shortcut) {
        let action = match shortcut {
            Shortcut::Circle => MenuAction::Shape(ShapePreset::Circle),
            Shortcut::Rounded => MenuAction::Shape(ShapePreset::Rounded),
            Shortcut::Rectangle => MenuAction::Shape(ShapePreset::Rectangle),
            Shortcut::Custom => MenuAction::CustomMode,
            Shortcut::CycleSize => {
                let next = self.state.size.map_or(SizePreset::Small, SizePreset::next);
                MenuAction::Size(next)
            }
            Shortcut::Mirror => MenuAction::Mirror,
            Shortcut::CycleBorder => MenuAction::Border(self.state.border.next()),
            Shortcut::ClickThrough => MenuAction::ClickThrough,
            Shortcut::NextCamera => {
                let count = self.camera.devices().len();
                if count == 0 {
                    return;
                }
                MenuAction::Camera((self.camera.active_index() + 1) % count)
            }
            Shortcut::RetryCamera => MenuAction::RetryCamera,
            Shortcut::Grow | Shortcut::Shrink => {
                if self.features.scale_shortcuts {
                    let factor = if shortcut == Shortcut::Grow { GROW } else { SHRINK };
                    let next = self.state.scaled(factor, &self.limits.bounds);
                    self.commit(next);
                }
                return;
            }
            // Handled by the controller.
            Shortcut::ResetSize | Shortcut::Escape => return,
        };
        self.apply(action);
    }

    pub fn handle_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::MenuAction { action } => self.apply(action),
            ControllerEvent::SizeResync { width, height } => {
                // Re-derive from the controller's size without echoing a resize back.
                self.state = self.state.with_geometry(width, height, &self.limits.bounds);
                self.interaction.pointer_up();
            }
        }
    }

    fn apply(&mut self, action: MenuAction) {
        let bounds = self.limits.bounds;
        let s = self.state;
        match action {
            MenuAction::Shape(preset) => self.commit(s.with_shape(preset, &bounds)),
            MenuAction::CustomMode if self.features.custom_shape => self.commit(s.with_custom()),
            MenuAction::Size(size) => self.commit(s.with_size(size, &bounds)),
            MenuAction::Mirror => self.commit(s.with_mirror(!s.mirrored)),
            MenuAction::Border(theme) if self.features.border_themes => self.commit(s.with_border(theme)),
            MenuAction::ClickThrough => {
                let enabled = !s.click_through;
                self.interaction.pointer_up();
                self.commit(s.with_click_through(enabled));
                self.outbox.send(ViewRequest::SetClickThrough { enabled });
            }
            MenuAction::Camera(index) => {
                self.camera.select(index);
            }
            MenuAction::RetryCamera => {
                self.camera.initialize();
            }
            MenuAction::CustomMode | MenuAction::Border(_) => {
                tracing::debug!(?action, "action disabled for this variant");
            }
            // The controller quits before forwarding anything.
            MenuAction::Quit => {}
        }
    }

    /// Periodic hot-plug check.
    pub fn refresh_cameras(&mut self) -> bool {
        self.camera.refresh_devices()
    }

    /// Focus came back to the window.
    pub fn on_visible(&mut self) -> CameraStatus {
        self.camera.on_visible()
    }

    pub fn menu_state(&self) -> MenuState {
        let active = self.camera.active_index();
        MenuState {
            shape: self.state.shape.preset(),
            size: self.state.size,
            mirrored: self.state.mirrored,
            border: self.state.border,
            click_through: self.state.click_through,
            custom_enabled: self.features.custom_shape,
            themes_enabled: self.features.border_themes,
            camera_live: self.camera.status() == CameraStatus::Live,
            cameras: self
                .camera
                .devices()
                .iter()
                .enumerate()
                .map(|(index, d)| CameraEntry { label: d.label.clone(), index, active: index == active })
                .collect(),
        }
    }

    pub fn style(&self) -> BubbleStyle {
        BubbleStyle {
            geometry: self.state.geometry,
            radius_pct: self.state.radius_pct(),
            mirrored: self.state.mirrored,
            border: self.state.border,
            inset: self.limits.padding / 2,
        }
    }

    /// Grab a frame (keeping the last good one) and paint the bubble.
    pub fn render(&mut self, canvas: &mut FrameBuffer) {
        if self.camera.status() == CameraStatus::Live {
            if let Some(frame) = self.camera.next_frame() {
                self.last_frame = Some(frame);
            }
        } else {
            self.last_frame = None;
        }
        render_bubble(canvas, self.last_frame.as_ref(), &self.style());
    }
}
