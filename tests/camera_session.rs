mod common;

use camera_bubble::camera::{CameraSession, CameraStatus};
use common::{FakeBackend, device};

#[test]
fn initialize_starts_first_device() {
    let backend = FakeBackend::with_devices(2);
    let log = backend.log();
    let mut session = CameraSession::new(backend);
    assert_eq!(session.initialize(), CameraStatus::Live);
    assert_eq!(session.active_index(), 0);
    assert_eq!(*log.borrow(), vec!["open Cam 0"]);
    assert!(session.next_frame().is_some());
}

#[test]
fn no_devices_reports_no_camera() {
    let mut session = CameraSession::new(FakeBackend::with_devices(0));
    assert_eq!(session.initialize(), CameraStatus::NoCamera);
    assert!(session.next_frame().is_none());
}

#[test]
fn permission_denied_reports_no_camera() {
    let mut backend = FakeBackend::with_devices(1);
    backend.deny_permission = true;
    let mut session = CameraSession::new(backend);
    assert_eq!(session.initialize(), CameraStatus::NoCamera);
}

#[test]
fn selecting_active_camera_is_a_no_op() {
    let backend = FakeBackend::with_devices(2);
    let log = backend.log();
    let mut session = CameraSession::new(backend);
    session.initialize();
    session.select(0);
    assert_eq!(*log.borrow(), vec!["open Cam 0"]);
}

#[test]
fn switching_stops_previous_stream_first() {
    let backend = FakeBackend::with_devices(2);
    let log = backend.log();
    let mut session = CameraSession::new(backend);
    session.initialize();
    assert_eq!(session.select(1), CameraStatus::Live);
    assert_eq!(*log.borrow(), vec!["open Cam 0", "stop Cam 0", "open Cam 1"]);
    assert_eq!(session.active_index(), 1);
}

#[test]
fn out_of_range_selection_is_ignored() {
    let backend = FakeBackend::with_devices(1);
    let log = backend.log();
    let mut session = CameraSession::new(backend);
    session.initialize();
    assert_eq!(session.select(5), CameraStatus::Live);
    assert_eq!(session.active_index(), 0);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn failed_open_degrades_to_no_camera() {
    let mut backend = FakeBackend::with_devices(1);
    backend.fail_open = true;
    let mut session = CameraSession::new(backend);
    assert_eq!(session.initialize(), CameraStatus::NoCamera);
    assert_eq!(session.on_visible(), CameraStatus::NoCamera);
}

#[test]
fn on_visible_only_retries_without_stream() {
    let backend = FakeBackend::with_devices(1);
    let log = backend.log();
    let mut session = CameraSession::new(backend);
    session.initialize();
    assert_eq!(session.on_visible(), CameraStatus::Live);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn refresh_keeps_active_device() {
    let backend = FakeBackend::with_devices(1);
    let mut session = CameraSession::new(backend);
    session.initialize();
    assert!(!session.refresh_devices());
    assert_eq!(session.devices(), &[device(0)]);
    assert_eq!(session.active_index(), 0);
}
