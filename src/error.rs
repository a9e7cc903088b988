// Crate error type. Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    WindowInit(String),   // Creating the bubble window failed
    WindowUpdate(String), // Presenting or restyling the window failed
    CameraInit(String),   // Permission, enumeration or stream start failed
    CameraFrame(String),  // Grabbing/decoding a frame failed
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::CameraInit(s) => write!(f, "Camera init error: {s}"),
            Error::CameraFrame(s) => write!(f, "Camera frame error: {s}"),
        }
    }
}

impl std::error::Error for Error {}
