// The OS window behind the bubble.
//
// minifb cannot resize a window after creation, so the surface opens one
// borderless, topmost, transparent window at its largest possible extent and
// treats "size" as the logical content rectangle anchored at the top-left.
// Everything outside that rectangle is kept fully transparent.

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, ScaleMode, Window, WindowOptions};

use crate::error::Error;
use crate::types::{FrameBuffer, TRANSPARENT};

/// What the window controller needs from a window. Split out so the
/// controller can be driven without a display.
pub trait WindowSurface {
    fn position(&self) -> (i32, i32);
    fn set_position(&mut self, x: i32, y: i32);
    fn size(&self) -> (u32, u32);
    fn set_size(&mut self, width: u32, height: u32);
    /// Wipe the background back to fully transparent.
    fn reassert_transparency(&mut self);
    fn set_click_through(&mut self, enabled: bool) -> Result<(), Error>;
}

/// Raw input sampled once per frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    /// Pointer in window-local pixels; may lie outside the window.
    pub pointer: Option<(f64, f64)>,
    pub left_down: bool,
    pub right_down: bool,
    pub keys: Vec<Key>,
    pub focused: bool,
}

pub struct MinifbSurface {
    window: Window, // the on-screen window you see
    canvas: FrameBuffer,
    size: (u32, u32),
}

impl MinifbSurface {
    /// Open the window at `position` with room for bubbles up to `max_extent` pixels.
    pub fn open(title: &str, max_extent: (u32, u32), size: (u32, u32), position: (i32, i32)) -> Result<Self, Error> {
        let options = WindowOptions {
            borderless: true,
            title: false,
            resize: false,
            topmost: true,
            transparency: true,
            scale_mode: ScaleMode::UpperLeft,
            ..WindowOptions::default()
        };
        let (cw, ch) = (max_extent.0 as usize, max_extent.1 as usize);
        let mut window = Window::new(title, cw, ch, options).map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_position(position.0 as isize, position.1 as isize);
        window.topmost(true);
        window.set_target_fps(60);

        Ok(Self { window, canvas: FrameBuffer::transparent(cw, ch), size })
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn poll_input(&mut self) -> InputSnapshot {
        InputSnapshot {
            pointer: self.window.get_mouse_pos(MouseMode::Pass).map(|(x, y)| (x as f64, y as f64)),
            left_down: self.window.get_mouse_down(MouseButton::Left),
            right_down: self.window.get_mouse_down(MouseButton::Right),
            keys: self.window.get_keys_pressed(KeyRepeat::No),
            focused: self.window.is_active(),
        }
    }

    /// Copy the logical-size `frame` into the top-left of the canvas and show it.
    pub fn present(&mut self, frame: &FrameBuffer) -> Result<(), Error> {
        let (w, h) = (
            frame.width.min(self.canvas.width),
            frame.height.min(self.canvas.height),
        );
        for y in 0..h {
            let src = &frame.pixels[y * frame.width..y * frame.width + w];
            let dst_start = y * self.canvas.width;
            self.canvas.pixels[dst_start..dst_start + w].copy_from_slice(src);
        }
        self.window
            .update_with_buffer(&self.canvas.pixels, self.canvas.width, self.canvas.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }
}

impl WindowSurface for MinifbSurface {
    /// Read back from the OS: the window manager may refuse or adjust a move.
    fn position(&self) -> (i32, i32) {
        let (x, y) = self.window.get_position();
        (x as i32, y as i32)
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.window.set_position(x as isize, y as isize);
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (
            width.min(self.canvas.width as u32),
            height.min(self.canvas.height as u32),
        );
    }

    fn reassert_transparency(&mut self) {
        self.canvas.pixels.fill(TRANSPARENT);
    }

    fn set_click_through(&mut self, enabled: bool) -> Result<(), Error> {
        click_through::apply(&self.window, enabled)
    }
}

#[cfg(target_os = "windows")]
mod click_through {
    use minifb::Window;
    use raw_window_handle::{HasWindowHandle, RawWindowHandle};
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::WindowsAndMessaging::{
        GWL_EXSTYLE, GetWindowLongPtrW, SetWindowLongPtrW, WS_EX_LAYERED, WS_EX_TRANSPARENT,
    };

    use crate::error::Error;

    pub fn apply(window: &Window, enabled: bool) -> Result<(), Error> {
        let handle = window
            .window_handle()
            .map_err(|e| Error::WindowUpdate(format!("Window handle: {e}")))?;
        let RawWindowHandle::Win32(win32) = handle.as_raw() else {
            return Err(Error::WindowUpdate("Window handle: not a Win32 window".into()));
        };
        let hwnd = HWND(win32.hwnd.get() as *mut std::ffi::c_void);
        // SAFETY: hwnd belongs to the live minifb window borrowed above.
        unsafe {
            let style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);
            let next = if enabled {
                style | (WS_EX_LAYERED.0 | WS_EX_TRANSPARENT.0) as isize
            } else {
                style & !(WS_EX_TRANSPARENT.0 as isize)
            };
            SetWindowLongPtrW(hwnd, GWL_EXSTYLE, next);
        }
        tracing::debug!(enabled, "toggled WS_EX_TRANSPARENT");
        Ok(())
    }
}

#[cfg(not(target_os = "windows"))]
mod click_through {
    use minifb::Window;

    use crate::error::Error;

    pub fn apply(_window: &Window, enabled: bool) -> Result<(), Error> {
        if enabled {
            tracing::warn!("click-through is not supported by this platform; pointer input will be ignored instead");
        }
        Ok(())
    }
}
