// Camera Bubble: a floating, always-on-top webcam bubble.
// • Left-drag inside the bubble moves it; left-drag near its edge reshapes it.
// • Right-click opens the menu (shape, size, camera, mirror, border, click-through).
// • 1/2/3 circle/rounded/rectangle, 4 custom, S size, +/- scale, M mirror,
//   B border, T click-through, N next camera, R reset size, Enter retry, ESC quit.

use std::time::{Duration, Instant};

use anyhow::Context;

use camera_bubble::bubble::{BubbleState, BubbleView};
use camera_bubble::camera::{CameraSession, NokhwaBackend};
use camera_bubble::config::Config;
use camera_bubble::controller::WindowController;
use camera_bubble::input::{PointerEvent, PointerTracker, Shortcut, shortcut_for};
use camera_bubble::logging;
use camera_bubble::messages::{ControllerEvent, ViewRequest, channel};
use camera_bubble::surface::{MinifbSurface, WindowSurface};
use camera_bubble::types::FrameBuffer;

const TITLE: &str = "Camera Bubble";
const HOTPLUG_INTERVAL: Duration = Duration::from_secs(2);

fn main() -> anyhow::Result<()> {
    let config_path = Config::path();
    let config = Config::load(&config_path).with_context(|| format!("loading {config_path}"))?;
    logging::init(config.debug_logging);
    tracing::info!(path = %config_path, variant = ?config.variant, "starting camera bubble");

    /* --- Channels between the two components --- */
    let (view_outbox, view_requests) = channel::<ViewRequest>();
    let (controller_outbox, controller_events) = channel::<ControllerEvent>();

    /* --- Bubble view: state + camera session --- */
    let limits = config.limits();
    let state = BubbleState::new(config.shape, config.size, config.mirrored, config.border, &limits.bounds);
    let camera = CameraSession::new(NokhwaBackend::new(config.camera_width, config.camera_height, config.camera_fps));
    let mut view = BubbleView::new(state, config.variant, limits, camera, view_outbox);

    /* --- Window controller: one window big enough for the largest bubble --- */
    let extent = limits.bounds.max + limits.padding;
    let surface = MinifbSurface::open(TITLE, (extent, extent), view.window_size(), config.position())?;
    let mut controller = WindowController::new(surface, controller_outbox, limits.padding, config.size.target());

    view.start();

    let mut tracker = PointerTracker::default();
    let mut canvas = FrameBuffer::transparent(0, 0);
    let mut was_focused = true;
    let mut last_hotplug = Instant::now();

    /* ------------------------------ Main loop ------------------------------ */
    while controller.surface().is_open() && !controller.should_quit() {
        /* 1) Input: pointer edges in window-local and screen coordinates */
        let input = controller.surface_mut().poll_input();
        let (wx, wy) = controller.surface().position();
        for event in tracker.update(&input) {
            match event {
                PointerEvent::Move { at } => {
                    controller.track_pointer(at);
                    if !controller.menu_open() {
                        view.pointer_move((wx as f64 + at.0, wy as f64 + at.1));
                    }
                }
                PointerEvent::Down { button, at } => {
                    if !controller.menu_click(at) {
                        view.pointer_down(button, at, (wx as f64 + at.0, wy as f64 + at.1));
                    }
                }
                PointerEvent::Up { button } => view.pointer_up(button),
            }
        }

        for key in &input.keys {
            match shortcut_for(*key) {
                Some(Shortcut::Escape) if controller.menu_open() => controller.close_menu(),
                Some(Shortcut::Escape) => controller.request_quit(),
                Some(Shortcut::ResetSize) => controller.reset_size(),
                Some(Shortcut::ClickThrough) => {
                    view.handle_shortcut(Shortcut::ClickThrough);
                    tracing::info!(enabled = view.state().click_through, "click-through toggled");
                }
                Some(shortcut) => view.handle_shortcut(shortcut),
                None => {}
            }
        }

        /* 2) Deliver messages both ways (view requests may answer controller events) */
        for request in view_requests.try_iter() {
            controller.handle_request(request);
        }
        for event in controller_events.try_iter() {
            view.handle_event(event);
        }
        for request in view_requests.try_iter() {
            controller.handle_request(request);
        }

        /* 3) Camera housekeeping: hot-plug and retry on focus regain */
        if last_hotplug.elapsed() >= HOTPLUG_INTERVAL {
            view.refresh_cameras();
            last_hotplug = Instant::now();
        }
        if input.focused && !was_focused {
            view.on_visible();
        }
        was_focused = input.focused;

        /* 4) Paint the bubble, the popup on top, and present */
        view.render(&mut canvas);
        controller.overlay(&mut canvas);
        controller.surface_mut().present(&canvas)?;
    }

    tracing::info!("camera bubble closed");
    Ok(())
}
