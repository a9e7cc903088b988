#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use camera_bubble::camera::{CaptureBackend, CaptureStream, DeviceInfo};
use camera_bubble::error::Error;
use camera_bubble::surface::WindowSurface;
use camera_bubble::types::FrameBuffer;
use nokhwa::utils::CameraIndex;

pub type Log = Rc<RefCell<Vec<String>>>;

pub fn device(i: u32) -> DeviceInfo {
    DeviceInfo { label: format!("Cam {i}"), index: CameraIndex::Index(i) }
}

/// Capture backend that records every open/stop in a shared log.
pub struct FakeBackend {
    pub devices: Vec<DeviceInfo>,
    pub deny_permission: bool,
    pub fail_open: bool,
    pub log: Log,
}

impl FakeBackend {
    pub fn with_devices(count: u32) -> Self {
        Self {
            devices: (0..count).map(device).collect(),
            deny_permission: false,
            fail_open: false,
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn log(&self) -> Log {
        Rc::clone(&self.log)
    }
}

pub struct FakeStream {
    label: String,
    log: Log,
}

impl CaptureStream for FakeStream {
    fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        Ok(FrameBuffer { width: 4, height: 4, pixels: vec![0xFF_11_22_33; 16] })
    }

    fn stop(&mut self) {
        self.log.borrow_mut().push(format!("stop {}", self.label));
    }
}

impl CaptureBackend for FakeBackend {
    type Stream = FakeStream;

    fn request_permission(&mut self) -> Result<(), Error> {
        if self.deny_permission {
            Err(Error::CameraInit("denied".into()))
        } else {
            Ok(())
        }
    }

    fn enumerate(&mut self) -> Result<Vec<DeviceInfo>, Error> {
        Ok(self.devices.clone())
    }

    fn open(&mut self, device: &DeviceInfo) -> Result<FakeStream, Error> {
        if self.fail_open {
            return Err(Error::CameraInit("busy".into()));
        }
        self.log.borrow_mut().push(format!("open {}", device.label));
        Ok(FakeStream { label: device.label.clone(), log: Rc::clone(&self.log) })
    }
}

/// Window surface that just remembers what was applied to it.
#[derive(Debug, Default)]
pub struct FakeSurface {
    pub position: (i32, i32),
    pub size: (u32, u32),
    pub transparency_resets: usize,
    pub click_through: bool,
}

impl WindowSurface for FakeSurface {
    fn position(&self) -> (i32, i32) {
        self.position
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.position = (x, y);
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn reassert_transparency(&mut self) {
        self.transparency_resets += 1;
    }

    fn set_click_through(&mut self, enabled: bool) -> Result<(), Error> {
        self.click_through = enabled;
        Ok(())
    }
}
