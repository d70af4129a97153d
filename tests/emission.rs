//! Emission-order tests against a plain file target; every write an evdev node would
//! see lands here instead, byte for byte.

mod common;

use std::error::Error;

use tempfile::NamedTempFile;

use common::{assert_key, assert_syn, read_events, shapes};
use sendkey::{DevicePath, EventDevice, InjectorConfig, KeyCode, KeyInjector};

#[test]
fn tap_writes_press_and_release_with_sync_markers() -> Result<(), Box<dyn Error>> {
    let target = NamedTempFile::new()?;
    let injector = KeyInjector::new(InjectorConfig::default());

    let mut device = EventDevice::open(DevicePath::new(target.path()))?;
    injector.tap(&mut device, KeyCode::new(125))?;
    drop(device);

    let events = read_events(target.path());
    assert_eq!(events.len(), 4);
    assert_key(&events[0], 125, 1);
    assert_syn(&events[1]);
    assert_key(&events[2], 125, 0);
    assert_syn(&events[3]);
    Ok(())
}

#[test]
fn tap_without_sync_writes_only_the_key_events() -> Result<(), Box<dyn Error>> {
    let target = NamedTempFile::new()?;
    let injector = KeyInjector::new(InjectorConfig {
        emit_sync: false,
        ..InjectorConfig::default()
    });

    let mut device = EventDevice::open(DevicePath::new(target.path()))?;
    injector.tap(&mut device, KeyCode::new(66))?;
    drop(device);

    let events = read_events(target.path());
    assert_eq!(events.len(), 2);
    assert_key(&events[0], 66, 1);
    assert_key(&events[1], 66, 0);
    Ok(())
}

#[test]
fn events_carry_nondecreasing_wall_clock_timestamps() -> Result<(), Box<dyn Error>> {
    let target = NamedTempFile::new()?;
    let injector = KeyInjector::new(InjectorConfig::default());

    let mut device = EventDevice::open(DevicePath::new(target.path()))?;
    injector.tap(&mut device, KeyCode::new(125))?;
    drop(device);

    let events = read_events(target.path());
    assert!(events[0].time.tv_sec > 0, "timestamp should be wall-clock");
    assert!(events
        .windows(2)
        .all(|w| (w[0].time.tv_sec, w[0].time.tv_usec) <= (w[1].time.tv_sec, w[1].time.tv_usec)));
    Ok(())
}

#[test]
fn repeated_taps_append_identical_record_shapes() -> Result<(), Box<dyn Error>> {
    let target = NamedTempFile::new()?;
    let injector = KeyInjector::new(InjectorConfig::default());

    let mut device = EventDevice::open(DevicePath::new(target.path()))?;
    injector.tap(&mut device, KeyCode::new(125))?;
    injector.tap(&mut device, KeyCode::new(125))?;
    drop(device);

    let events = read_events(target.path());
    assert_eq!(events.len(), 8);
    let all = shapes(&events);
    assert_eq!(all[..4], all[4..]);
    Ok(())
}

#[test]
fn open_fails_cleanly_on_a_missing_node() {
    let err = EventDevice::open(DevicePath::new("/definitely/not/a/node")).unwrap_err();
    assert!(matches!(err, sendkey::Error::Open { .. }));
    assert!(err.to_string().contains("cannot open"));
}
