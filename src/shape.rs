// Named presets: shapes, sizes and border themes.

use serde::{Deserialize, Serialize};

use crate::geometry::{Geometry, corner_radius_pct};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapePreset {
    Circle,
    Rounded,
    Rectangle,
}

impl ShapePreset {
    pub const ALL: [ShapePreset; 3] = [ShapePreset::Circle, ShapePreset::Rounded, ShapePreset::Rectangle];

    /// Fixed corner radius, percent of each side.
    pub fn radius_pct(self) -> f64 {
        match self {
            ShapePreset::Circle => 50.0,
            ShapePreset::Rounded => 18.0,
            ShapePreset::Rectangle => 4.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShapePreset::Circle => "CIRCLE",
            ShapePreset::Rounded => "ROUNDED",
            ShapePreset::Rectangle => "RECTANGLE",
        }
    }
}

/// Either a preset (square, fixed radius) or custom (radius follows aspect ratio).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeMode {
    Preset(ShapePreset),
    Custom,
}

impl ShapeMode {
    pub fn radius_pct(&self, geometry: &Geometry) -> f64 {
        match self {
            ShapeMode::Preset(p) => p.radius_pct(),
            ShapeMode::Custom => corner_radius_pct(geometry.width as f64, geometry.height as f64),
        }
    }

    pub fn preset(&self) -> Option<ShapePreset> {
        match self {
            ShapeMode::Preset(p) => Some(*p),
            ShapeMode::Custom => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizePreset {
    Small,
    Medium,
    Large,
}

impl SizePreset {
    pub const ALL: [SizePreset; 3] = [SizePreset::Small, SizePreset::Medium, SizePreset::Large];

    /// Target length of the longer bubble side.
    pub fn target(self) -> u32 {
        match self {
            SizePreset::Small => 150,
            SizePreset::Medium => 200,
            SizePreset::Large => 300,
        }
    }

    pub fn next(self) -> Self {
        match self {
            SizePreset::Small => SizePreset::Medium,
            SizePreset::Medium => SizePreset::Large,
            SizePreset::Large => SizePreset::Small,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizePreset::Small => "SMALL",
            SizePreset::Medium => "MEDIUM",
            SizePreset::Large => "LARGE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderTheme {
    None,
    Light,
    Dark,
    Accent,
    Neon,
}

impl BorderTheme {
    pub const ALL: [BorderTheme; 5] =
        [BorderTheme::None, BorderTheme::Light, BorderTheme::Dark, BorderTheme::Accent, BorderTheme::Neon];

    /// Opaque ARGB stroke colour.
    pub fn color(self) -> u32 {
        match self {
            BorderTheme::None => 0,
            BorderTheme::Light => 0xFF_F5_F5_F5,
            BorderTheme::Dark => 0xFF_20_20_24,
            BorderTheme::Accent => 0xFF_3B_82_F6,
            BorderTheme::Neon => 0xFF_39_FF_14,
        }
    }

    /// Stroke width in pixels; 0 means no border.
    pub fn width(self) -> u32 {
        match self {
            BorderTheme::None => 0,
            BorderTheme::Neon => 4,
            _ => 3,
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            BorderTheme::None => "NONE",
            BorderTheme::Light => "LIGHT",
            BorderTheme::Dark => "DARK",
            BorderTheme::Accent => "ACCENT",
            BorderTheme::Neon => "NEON",
        }
    }
}
