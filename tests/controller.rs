mod common;

use camera_bubble::controller::WindowController;
use camera_bubble::messages::{ControllerEvent, MenuAction, MenuState, ViewRequest, channel};
use camera_bubble::shape::{BorderTheme, ShapePreset, SizePreset};
use common::FakeSurface;

fn menu_state() -> MenuState {
    MenuState {
        shape: Some(ShapePreset::Circle),
        size: Some(SizePreset::Medium),
        mirrored: true,
        border: BorderTheme::Light,
        click_through: false,
        custom_enabled: true,
        themes_enabled: true,
        camera_live: true,
        cameras: Vec::new(),
    }
}

#[test]
fn resize_clamps_rounds_and_clears_background() {
    let (tx, _rx) = channel();
    let mut c = WindowController::new(FakeSurface::default(), tx, 20, 200);
    c.handle_request(ViewRequest::ResizeWindow { width: 10.0, height: 219.6 });
    assert_eq!(c.surface().size, (50, 220));
    assert_eq!(c.surface().transparency_resets, 1);
}

#[test]
fn resize_ignores_invalid_input() {
    let (tx, _rx) = channel();
    let surface = FakeSurface { size: (220, 220), ..FakeSurface::default() };
    let mut c = WindowController::new(surface, tx, 20, 200);
    c.resize_to(f64::NAN, 100.0);
    c.resize_to(0.0, 100.0);
    assert_eq!(c.surface().size, (220, 220));
    assert_eq!(c.surface().transparency_resets, 0);
}

#[test]
fn move_is_additive() {
    let (tx, _rx) = channel();
    let surface = FakeSurface { position: (100, 100), ..FakeSurface::default() };
    let mut c = WindowController::new(surface, tx, 20, 200);
    c.handle_request(ViewRequest::MoveWindow { dx: 5.4, dy: -3.0 });
    c.handle_request(ViewRequest::MoveWindow { dx: f64::INFINITY, dy: 1.0 });
    c.handle_request(ViewRequest::MoveWindow { dx: -200.0, dy: 0.0 });
    assert_eq!(c.surface().position, (-95, 97));
}

#[test]
fn menu_pick_is_forwarded_as_event() {
    let (tx, rx) = channel();
    let surface = FakeSurface { size: (220, 220), ..FakeSurface::default() };
    let mut c = WindowController::new(surface, tx, 20, 200);
    c.track_pointer((0.0, 0.0));
    c.handle_request(ViewRequest::ShowContextMenu { state: menu_state() });
    assert!(c.menu_open());

    // Row layout: 2px top margin, 11px rows, 5px separators.
    // Row 0 "SHAPE >" opens the shape submenu.
    assert!(c.menu_click((10.0, 6.0)));
    assert!(c.menu_open());
    // Submenu rows: "< BACK", "* CIRCLE", "  ROUNDED"...
    assert!(c.menu_click((10.0, 2.0 + 11.0 * 2.0 + 4.0)));
    assert!(!c.menu_open());

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(
        events,
        vec![ControllerEvent::MenuAction { action: MenuAction::Shape(ShapePreset::Rounded) }]
    );
}

#[test]
fn click_outside_dismisses_menu() {
    let (tx, rx) = channel();
    let surface = FakeSurface { size: (220, 220), ..FakeSurface::default() };
    let mut c = WindowController::new(surface, tx, 20, 200);
    c.show_context_menu(&menu_state());
    assert!(c.menu_click((219.0, 219.0)));
    assert!(!c.menu_open());
    assert!(rx.try_iter().next().is_none());
    assert!(!c.menu_click((5.0, 5.0)));
}

#[test]
fn reset_resizes_and_resyncs_view() {
    let (tx, rx) = channel();
    let mut c = WindowController::new(FakeSurface::default(), tx, 20, 200);
    c.reset_size();
    assert_eq!(c.surface().size, (220, 220));
    assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![ControllerEvent::SizeResync { width: 200.0, height: 200.0 }]);
}

#[test]
fn click_through_reaches_surface() {
    let (tx, _rx) = channel();
    let mut c = WindowController::new(FakeSurface::default(), tx, 20, 200);
    c.handle_request(ViewRequest::SetClickThrough { enabled: true });
    assert!(c.click_through());
    assert!(c.surface().click_through);
}

#[test]
fn moves_start_from_where_the_window_really_is() {
    let (tx, _rx) = channel();
    let mut c = WindowController::new(FakeSurface::default(), tx, 20, 200);
    c.handle_request(ViewRequest::MoveWindow { dx: 10.0, dy: 5.0 });
    assert_eq!(c.surface().position, (10, 5));

    // The window manager snaps the window somewhere else between moves.
    c.surface_mut().position = (300, 40);
    c.handle_request(ViewRequest::MoveWindow { dx: -4.6, dy: 2.0 });
    assert_eq!(c.surface().position, (295, 42));
}
