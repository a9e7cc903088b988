use camera_bubble::menu::{MenuItem, PopupMenu, PopupOutcome, build_menu};
use camera_bubble::messages::{CameraEntry, MenuAction, MenuState};
use camera_bubble::shape::{BorderTheme, ShapePreset, SizePreset};
use camera_bubble::types::FrameBuffer;

fn state() -> MenuState {
    MenuState {
        shape: None,
        size: Some(SizePreset::Small),
        mirrored: false,
        border: BorderTheme::Dark,
        click_through: false,
        custom_enabled: true,
        themes_enabled: false,
        camera_live: false,
        cameras: vec![CameraEntry { label: "FaceTime HD".into(), index: 0, active: true }],
    }
}

fn submenu<'a>(items: &'a [MenuItem], name: &str) -> &'a [MenuItem] {
    items
        .iter()
        .find_map(|i| match i {
            MenuItem::Submenu { label, items } if label == name => Some(items.as_slice()),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no {name} submenu"))
}

#[test]
fn custom_mode_is_checked_when_no_preset() {
    let menu = build_menu(&state());
    let shapes = submenu(&menu, "SHAPE");
    assert!(shapes.contains(&MenuItem::Action {
        label: "CUSTOM".into(),
        checked: Some(true),
        enabled: true,
        action: MenuAction::CustomMode,
    }));
    assert!(shapes.contains(&MenuItem::Action {
        label: "CIRCLE".into(),
        checked: Some(false),
        enabled: true,
        action: MenuAction::Shape(ShapePreset::Circle),
    }));
}

#[test]
fn themes_hidden_when_disabled() {
    let menu = build_menu(&state());
    assert!(!menu.iter().any(|i| matches!(i, MenuItem::Submenu { label, .. } if label == "BORDER")));
}

#[test]
fn camera_submenu_offers_retry_without_stream() {
    let menu = build_menu(&state());
    let cams = submenu(&menu, "CAMERA");
    assert!(matches!(&cams[0], MenuItem::Action { action: MenuAction::Camera(0), checked: Some(true), .. }));
    assert!(matches!(cams.last(), Some(MenuItem::Action { action: MenuAction::RetryCamera, .. })));
}

#[test]
fn actions_serialize_as_type_and_value() {
    let json = serde_json::to_string(&MenuAction::Shape(ShapePreset::Circle)).unwrap();
    assert_eq!(json, r#"{"type":"shape","value":"circle"}"#);
    let json = serde_json::to_string(&MenuAction::CustomMode).unwrap();
    assert_eq!(json, r#"{"type":"custom-mode"}"#);
    let back: MenuAction = serde_json::from_str(r#"{"type":"camera","value":2}"#).unwrap();
    assert_eq!(back, MenuAction::Camera(2));
}

#[test]
fn long_camera_labels_stay_inside_a_small_window() {
    let mut s = state();
    s.cameras[0].label = "Integrated Webcam With A Very Long Vendor Name".into();
    let view = (170, 170);
    let mut popup = PopupMenu::new(build_menu(&s), (0, 0));
    // Root rows: SHAPE, SIZE, separator, CAMERA.
    assert_eq!(popup.click(5.0, 33.0, view), PopupOutcome::Stay);

    let (w, h) = popup.size(view);
    assert_eq!(w, 170);
    assert!(h <= 170);

    let mut canvas = FrameBuffer::transparent(170, 170);
    popup.render(&mut canvas);
    assert_ne!(canvas.get(169, 5), 0);
}

#[test]
fn short_rows_keep_their_natural_width() {
    let popup = PopupMenu::new(build_menu(&state()), (0, 0));
    // Widest root row is "  CLICK-THROUGH": 15 glyphs plus side padding.
    assert_eq!(popup.size((500, 500)).0, 15 * 6 + 8);
}
