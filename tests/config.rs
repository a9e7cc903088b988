use camera_bubble::bubble::Variant;
use camera_bubble::config::Config;
use camera_bubble::geometry::Bounds;
use camera_bubble::shape::{BorderTheme, ShapeMode, SizePreset};
use tempfile::tempdir;

#[test]
fn missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bubble.json");
    let cfg = Config::load(path.to_str().unwrap()).unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.bounds(), Bounds { min: 100, max: 500 });
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bubble.json");
    std::fs::write(&path, r#"{ "variant": "fixed", "shape": "custom", "border": "neon", "min_size": 600 }"#).unwrap();
    let cfg = Config::load(path.to_str().unwrap()).unwrap();
    assert_eq!(cfg.variant, Variant::Fixed);
    assert_eq!(cfg.shape, ShapeMode::Custom);
    assert_eq!(cfg.border, BorderTheme::Neon);
    assert_eq!(cfg.size, SizePreset::Medium);
    assert!(cfg.mirrored);
    // Inverted bounds are swapped rather than rejected.
    assert_eq!(cfg.bounds(), Bounds { min: 500, max: 600 });
}

#[test]
fn save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bubble.json");
    let path = path.to_str().unwrap();
    let cfg = Config { position: Some((10, 20)), debug_logging: true, ..Config::default() };
    cfg.save(path).unwrap();
    assert_eq!(Config::load(path).unwrap(), cfg);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bubble.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(Config::load(path.to_str().unwrap()).is_err());
}

#[test]
fn unreadable_path_is_an_error() {
    let dir = tempdir().unwrap();
    // A directory exists but cannot be read as a file.
    assert!(Config::load(dir.path().to_str().unwrap()).is_err());
}

#[test]
fn odd_padding_is_rounded_down_to_even() {
    let cfg = Config { padding: 21, ..Config::default() };
    assert_eq!(cfg.limits().padding, 20);
}
