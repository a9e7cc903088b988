// Camera session: device list, active index, and the one live stream.
// The nokhwa backend opens a device and converts frames into ARGB buffers the
// renderer can sample from.

use crate::error::Error;
use crate::types::FrameBuffer;

use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

// We also use `image` crate types to name the decoded frame.
use image::{ImageBuffer, Rgb};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub label: String,
    pub index: CameraIndex,
}

pub trait CaptureStream {
    /// Blocks until the next frame is ready.
    fn next_frame(&mut self) -> Result<FrameBuffer, Error>;
    /// Stop every track of this stream.
    fn stop(&mut self);
}

pub trait CaptureBackend {
    type Stream: CaptureStream;

    fn request_permission(&mut self) -> Result<(), Error>;
    fn enumerate(&mut self) -> Result<Vec<DeviceInfo>, Error>;
    fn open(&mut self, device: &DeviceInfo) -> Result<Self::Stream, Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraStatus {
    Live,
    NoCamera,
}

pub struct CameraSession<B: CaptureBackend> {
    backend: B,
    devices: Vec<DeviceInfo>,
    active: usize,
    stream: Option<B::Stream>,
}

impl<B: CaptureBackend> CameraSession<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, devices: Vec::new(), active: 0, stream: None }
    }

    pub fn devices(&self) -> &[DeviceInfo] {
        &self.devices
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn status(&self) -> CameraStatus {
        if self.stream.is_some() { CameraStatus::Live } else { CameraStatus::NoCamera }
    }

    /// Ask for permission, list devices, and start the active one.
    pub fn initialize(&mut self) -> CameraStatus {
        if let Err(e) = self.backend.request_permission() {
            tracing::warn!("{e}");
            self.stop();
            return CameraStatus::NoCamera;
        }
        match self.backend.enumerate() {
            Ok(devices) => self.devices = devices,
            Err(e) => {
                tracing::warn!("{e}");
                self.stop();
                return CameraStatus::NoCamera;
            }
        }
        if self.devices.is_empty() {
            tracing::info!("no video input devices found");
            self.stop();
            return CameraStatus::NoCamera;
        }
        if self.active >= self.devices.len() {
            self.active = 0;
        }
        self.start(self.active)
    }

    /// Switch to device `index`. Selecting the active device does nothing.
    pub fn select(&mut self, index: usize) -> CameraStatus {
        if index == self.active {
            return self.status();
        }
        if index >= self.devices.len() {
            tracing::warn!(index, available = self.devices.len(), "camera index out of range");
            return self.status();
        }
        self.active = index;
        self.start(index)
    }

    /// Re-enumerate after a hot-plug. Never switches the active device.
    pub fn refresh_devices(&mut self) -> bool {
        match self.backend.enumerate() {
            Ok(devices) if devices != self.devices => {
                tracing::info!(count = devices.len(), "camera list changed");
                self.devices = devices;
                true
            }
            Ok(_) => false,
            Err(e) => {
                tracing::debug!("re-enumeration failed: {e}");
                false
            }
        }
    }

    /// The window became visible again; retry only if nothing is streaming.
    pub fn on_visible(&mut self) -> CameraStatus {
        if self.stream.is_none() {
            tracing::debug!("window visible without a stream, retrying camera");
            return self.initialize();
        }
        CameraStatus::Live
    }

    /// Pull one frame. `None` when there is no stream or the grab failed.
    pub fn next_frame(&mut self) -> Option<FrameBuffer> {
        let stream = self.stream.as_mut()?;
        match stream.next_frame() {
            Ok(frame) => Some(frame),
            Err(e) => {
                tracing::debug!("{e}");
                None
            }
        }
    }

    fn stop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
        }
    }

    fn start(&mut self, index: usize) -> CameraStatus {
        // Never hold two capture sessions at once.
        self.stop();
        let Some(device) = self.devices.get(index) else {
            return CameraStatus::NoCamera;
        };
        match self.backend.open(device) {
            Ok(stream) => {
                tracing::info!(camera = %device.label, "camera started");
                self.stream = Some(stream);
                CameraStatus::Live
            }
            Err(e) => {
                tracing::warn!("{e}");
                CameraStatus::NoCamera
            }
        }
    }
}

/* ------------------------------ nokhwa backend ------------------------------ */

pub struct NokhwaBackend {
    width: u32,
    height: u32,
    fps: u32,
}

impl NokhwaBackend {
    pub fn new(width: u32, height: u32, fps: u32) -> Self {
        Self { width, height, fps }
    }
}

impl CaptureBackend for NokhwaBackend {
    type Stream = NokhwaStream;

    #[cfg(target_os = "macos")]
    fn request_permission(&mut self) -> Result<(), Error> {
        if nokhwa::nokhwa_check() {
            return Ok(());
        }
        // The prompt answers asynchronously; the next focus regain retries.
        nokhwa::nokhwa_initialize(|granted| tracing::info!(granted, "camera permission answered"));
        if nokhwa::nokhwa_check() {
            Ok(())
        } else {
            Err(Error::CameraInit("Camera permission not granted".into()))
        }
    }

    #[cfg(not(target_os = "macos"))]
    fn request_permission(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn enumerate(&mut self) -> Result<Vec<DeviceInfo>, Error> {
        let cameras =
            nokhwa::query(ApiBackend::Auto).map_err(|e| Error::CameraInit(format!("Query devices: {e}")))?;
        Ok(cameras
            .into_iter()
            .enumerate()
            .map(|(i, info)| {
                let name = info.human_name();
                let label = if name.trim().is_empty() { format!("Camera {}", i + 1) } else { name };
                DeviceInfo { label, index: info.index().clone() }
            })
            .collect())
    }

    fn open(&mut self, device: &DeviceInfo) -> Result<NokhwaStream, Error> {
        let fmt = CameraFormat::new(
            Resolution::new(self.width, self.height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            self.fps,
        );
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(device.index.clone(), req)
            .map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;
        cam.open_stream().map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        let actual = cam.resolution();
        tracing::debug!(width = actual.width(), height = actual.height(), "stream resolution");
        Ok(NokhwaStream { cam })
    }
}

pub struct NokhwaStream {
    cam: Camera,
}

impl CaptureStream for NokhwaStream {
    fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        let frame = self.cam.frame().map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let rgb_img: ImageBuffer<Rgb<u8>, Vec<u8>> = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        let (w, h) = rgb_img.dimensions();
        let pixels = rgb_img
            .pixels()
            .map(|p| 0xFF00_0000 | (p[0] as u32) << 16 | (p[1] as u32) << 8 | p[2] as u32)
            .collect();

        Ok(FrameBuffer { width: w as usize, height: h as usize, pixels })
    }

    fn stop(&mut self) {
        if let Err(e) = self.cam.stop_stream() {
            tracing::warn!("Stop stream: {e}");
        }
    }
}
