// Core pixel and layout types shared by the view, the controller and the renderer.

/// Fully transparent pixel. Anything outside the bubble shape is painted with this.
pub const TRANSPARENT: u32 = 0x00_00_00_00;

#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pub width: usize,     // how wide the frame is (pixels)
    pub height: usize,    // how tall the frame is (pixels)
    pub pixels: Vec<u32>, // each entry is 0xAARRGGBB
}

impl FrameBuffer {
    /// A buffer of the given size filled with transparent pixels.
    pub fn transparent(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![TRANSPARENT; width * height] }
    }

    /// Resize in place, reusing the allocation, and clear to transparent.
    pub fn reset(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, TRANSPARENT);
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }
}

/// Axis-aligned rectangle in window-local pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}
