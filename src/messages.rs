//! Messages exchanged between the bubble view and the window controller.
//!
//! Both directions are fire-and-forget over FIFO channels. Resizes are
//! absolute and moves are additive, so no acknowledgement or sequence number
//! is needed.

use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};

use crate::shape::{BorderTheme, ShapePreset, SizePreset};

/// Requests the view sends to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ViewRequest {
    MoveWindow { dx: f64, dy: f64 },
    ResizeWindow { width: f64, height: f64 },
    ShowContextMenu { state: MenuState },
    SetClickThrough { enabled: bool },
}

/// Events the controller sends back to the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ControllerEvent {
    MenuAction { action: MenuAction },
    SizeResync { width: f64, height: f64 },
}

/// A menu selection, serialized as `{"type": ..., "value": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum MenuAction {
    Shape(ShapePreset),
    CustomMode,
    Size(SizePreset),
    Mirror,
    Camera(usize),
    RetryCamera,
    Border(BorderTheme),
    ClickThrough,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraEntry {
    pub label: String,
    pub index: usize,
    pub active: bool,
}

/// Snapshot of the view the controller needs to build the context menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuState {
    /// `None` while in custom mode.
    pub shape: Option<ShapePreset>,
    pub size: Option<SizePreset>,
    pub mirrored: bool,
    pub border: BorderTheme,
    pub click_through: bool,
    pub custom_enabled: bool,
    pub themes_enabled: bool,
    pub camera_live: bool,
    pub cameras: Vec<CameraEntry>,
}

/// Sending half of a one-way message channel. Sends never block or fail loudly.
#[derive(Debug, Clone)]
pub struct Outbox<T> {
    tx: Sender<T>,
}

impl<T: std::fmt::Debug> Outbox<T> {
    pub fn send(&self, message: T) {
        if let Err(e) = self.tx.send(message) {
            tracing::warn!("dropping message, receiver gone: {:?}", e.0);
        }
    }
}

/// Create a FIFO channel between the two components.
pub fn channel<T>() -> (Outbox<T>, Receiver<T>) {
    let (tx, rx) = mpsc::channel();
    (Outbox { tx }, rx)
}
