use serde::{Deserialize, Serialize};

use crate::bubble::{Limits, Variant};
use crate::geometry::{Bounds, MAX_SIZE, MIN_SIZE, WINDOW_PADDING};
use crate::shape::{BorderTheme, ShapeMode, ShapePreset, SizePreset};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "CAMERA_BUBBLE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "bubble.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Feature set: `fixed`, `fluid` or `themed`.
    #[serde(default)]
    pub variant: Variant,
    /// Starting shape. `custom` is only honoured by variants that allow it.
    #[serde(default = "default_shape")]
    pub shape: ShapeMode,
    #[serde(default = "default_size")]
    pub size: SizePreset,
    #[serde(default = "default_true")]
    pub mirrored: bool,
    #[serde(default = "default_border")]
    pub border: BorderTheme,
    #[serde(default = "default_min_size")]
    pub min_size: u32,
    #[serde(default = "default_max_size")]
    pub max_size: u32,
    /// Transparent margin around the bubble, split between both sides.
    #[serde(default = "default_padding")]
    pub padding: u32,
    /// Pixels from the bubble border where a press starts a resize instead of a drag.
    #[serde(default = "default_edge_threshold")]
    pub edge_threshold: f64,
    #[serde(default = "default_camera_width")]
    pub camera_width: u32,
    #[serde(default = "default_camera_height")]
    pub camera_height: u32,
    #[serde(default = "default_camera_fps")]
    pub camera_fps: u32,
    /// Initial window position. Defaults to `(80, 80)` when missing.
    #[serde(default)]
    pub position: Option<(i32, i32)>,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
}

fn default_shape() -> ShapeMode {
    ShapeMode::Preset(ShapePreset::Circle)
}

fn default_size() -> SizePreset {
    SizePreset::Medium
}

fn default_true() -> bool {
    true
}

fn default_border() -> BorderTheme {
    BorderTheme::Light
}

fn default_min_size() -> u32 {
    MIN_SIZE
}

fn default_max_size() -> u32 {
    MAX_SIZE
}

fn default_padding() -> u32 {
    WINDOW_PADDING
}

fn default_edge_threshold() -> f64 {
    12.0
}

fn default_camera_width() -> u32 {
    640
}

fn default_camera_height() -> u32 {
    480
}

fn default_camera_fps() -> u32 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            shape: default_shape(),
            size: default_size(),
            mirrored: true,
            border: default_border(),
            min_size: default_min_size(),
            max_size: default_max_size(),
            padding: default_padding(),
            edge_threshold: default_edge_threshold(),
            camera_width: default_camera_width(),
            camera_height: default_camera_height(),
            camera_fps: default_camera_fps(),
            position: None,
            debug_logging: false,
        }
    }
}

impl Config {
    /// Load from `path`. A missing or empty file yields the defaults; other IO errors are returned.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Config path from the environment, falling back to `bubble.json`.
    pub fn path() -> String {
        std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.min_size, self.max_size)
    }

    pub fn limits(&self) -> Limits {
        Limits {
            bounds: self.bounds(),
            padding: self.padding / 2 * 2,
            edge_threshold: self.edge_threshold.max(0.0),
        }
    }

    pub fn position(&self) -> (i32, i32) {
        self.position.unwrap_or((80, 80))
    }
}
