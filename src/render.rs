//! Paints the bubble into a window-sized ARGB canvas: the camera feed cropped
//! to cover the bubble, cut to the rounded shape, with an optional border.
//! Pixels outside the shape stay fully transparent.

use crate::draw::{GLYPH_HEIGHT, draw_text_5x7, text_width};
use crate::geometry::Geometry;
use crate::shape::BorderTheme;
use crate::types::FrameBuffer;

const PLACEHOLDER_BG: u32 = 0xFF_2A_2A_30;
const PLACEHOLDER_FG: u32 = 0xFF_DD_DD_DD;

/// Everything the renderer needs, derived from the bubble state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleStyle {
    pub geometry: Geometry,
    pub radius_pct: f64,
    pub mirrored: bool,
    pub border: BorderTheme,
    /// Margin between the window edge and the bubble.
    pub inset: u32,
}

/// Rectangle with elliptical corners, in bubble-local coordinates.
#[derive(Debug, Clone, Copy)]
struct Shape {
    width: f64,
    height: f64,
    rx: f64,
    ry: f64,
}

impl Shape {
    fn new(width: f64, height: f64, radius_pct: f64) -> Self {
        let pct = (radius_pct / 100.0).clamp(0.0, 0.5);
        Self { width, height, rx: width * pct, ry: height * pct }
    }

    /// Same shape shrunk by `by` pixels on every side.
    fn inset(&self, by: f64) -> Self {
        Self {
            width: self.width - 2.0 * by,
            height: self.height - 2.0 * by,
            rx: (self.rx - by).max(0.0),
            ry: (self.ry - by).max(0.0),
        }
    }

    /// Is the pixel centre (x, y) inside the shape?
    fn contains(&self, x: f64, y: f64) -> bool {
        if x < 0.0 || y < 0.0 || x > self.width || y > self.height {
            return false;
        }
        if self.rx <= 0.0 || self.ry <= 0.0 {
            return true;
        }
        // Distance into the nearest corner box, if any.
        let cx = if x < self.rx { self.rx - x } else if x > self.width - self.rx { x - (self.width - self.rx) } else { 0.0 };
        let cy = if y < self.ry { self.ry - y } else if y > self.height - self.ry { y - (self.height - self.ry) } else { 0.0 };
        if cx == 0.0 || cy == 0.0 {
            return true;
        }
        let nx = cx / self.rx;
        let ny = cy / self.ry;
        nx * nx + ny * ny <= 1.0
    }
}

/// Render one frame of the bubble. `canvas` is resized to the window size.
pub fn render_bubble(canvas: &mut FrameBuffer, frame: Option<&FrameBuffer>, style: &BubbleStyle) {
    let (bw, bh) = (style.geometry.width as usize, style.geometry.height as usize);
    let inset = style.inset as usize;
    canvas.reset(bw + 2 * inset, bh + 2 * inset);

    let outer = Shape::new(bw as f64, bh as f64, style.radius_pct);
    let stroke = style.border.width() as f64;
    let inner = outer.inset(stroke);
    let sampler = frame.filter(|f| f.width > 0 && f.height > 0).map(|f| CoverSampler::new(f, bw, bh, style.mirrored));

    for y in 0..bh {
        let row = (y + inset) * canvas.width + inset;
        for x in 0..bw {
            let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
            if !outer.contains(px, py) {
                continue;
            }
            let color = if stroke > 0.0 && !inner.contains(px - stroke, py - stroke) {
                style.border.color()
            } else {
                match &sampler {
                    Some(s) => s.sample(x, y),
                    None => PLACEHOLDER_BG,
                }
            };
            canvas.pixels[row + x] = color;
        }
    }

    if sampler.is_none() {
        draw_placeholder_text(canvas, style);
    }
}

fn draw_placeholder_text(canvas: &mut FrameBuffer, style: &BubbleStyle) {
    let cx = (style.inset + style.geometry.width / 2) as i32;
    let cy = (style.inset + style.geometry.height / 2) as i32;
    for (i, line) in ["NO CAMERA", "ENTER: RETRY"].iter().enumerate() {
        let x = cx - text_width(line) / 2;
        let y = cy - GLYPH_HEIGHT - 2 + i as i32 * (GLYPH_HEIGHT + 4);
        draw_text_5x7(canvas, x, y, line, PLACEHOLDER_FG);
    }
}

/// Maps bubble pixels onto a centre-cropped region of the camera frame that
/// covers the whole bubble (nearest neighbour).
struct CoverSampler<'a> {
    frame: &'a FrameBuffer,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    width: usize,
    mirrored: bool,
}

impl<'a> CoverSampler<'a> {
    fn new(frame: &'a FrameBuffer, width: usize, height: usize, mirrored: bool) -> Self {
        let scale = (frame.width as f64 / width as f64).min(frame.height as f64 / height as f64);
        let offset_x = (frame.width as f64 - width as f64 * scale) / 2.0;
        let offset_y = (frame.height as f64 - height as f64 * scale) / 2.0;
        Self { frame, scale, offset_x, offset_y, width, mirrored }
    }

    fn sample(&self, x: usize, y: usize) -> u32 {
        let x = if self.mirrored { self.width - 1 - x } else { x };
        let sx = ((x as f64 + 0.5) * self.scale + self.offset_x) as usize;
        let sy = ((y as f64 + 0.5) * self.scale + self.offset_y) as usize;
        let sx = sx.min(self.frame.width - 1);
        let sy = sy.min(self.frame.height - 1);
        self.frame.get(sx, sy) | 0xFF00_0000
    }
}
