//! Pressing and releasing a key on a device node.

use std::path::Path;

use tracing::{debug, warn};

use crate::device::EventDevice;
use crate::discover::{self, DevicePath, DiscoveryStrategy};
use crate::error::Error;
use crate::event::{InputEvent, KeyCode};

/// Options governing a single injection run.
#[derive(Clone, Debug)]
pub struct InjectorConfig {
    /// Emit a `SYN_REPORT` after each key event so the kernel delivers it immediately.
    pub emit_sync: bool,
    /// How to find a device when the caller does not name one.
    pub discovery: DiscoveryStrategy,
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self {
            emit_sync: true,
            discovery: DiscoveryStrategy::default(),
        }
    }
}

/// Sends a single key press and release to an evdev node.
#[derive(Clone, Debug, Default)]
pub struct KeyInjector {
    config: InjectorConfig,
}

impl KeyInjector {
    pub fn new(config: InjectorConfig) -> Self {
        Self { config }
    }

    /// Picks the device node to write to, honoring the configured discovery strategy.
    pub fn resolve(&self, key: KeyCode, explicit: Option<&Path>) -> Result<DevicePath, Error> {
        discover::resolve(explicit, key, self.config.discovery)
    }

    /// Presses and releases `key` on an already-open device.
    ///
    /// A failed press does not stop the release attempt, so the key is not left
    /// logically stuck down. The first failure is the one returned.
    pub fn tap(&self, device: &mut EventDevice, key: KeyCode) -> Result<(), Error> {
        let press = self.send_key(device, key, true);
        if let Err(err) = &press {
            warn!(error = %err, "press failed, still attempting the release");
        }
        let release = self.send_key(device, key, false);
        press.and(release)
    }

    fn send_key(&self, device: &mut EventDevice, key: KeyCode, pressed: bool) -> Result<(), Error> {
        let action = if pressed { "press" } else { "release" };
        device
            .emit(&[InputEvent::key(key, pressed)])
            .map_err(|source| Error::Write { action, source })?;
        if self.config.emit_sync {
            device
                .emit(&[InputEvent::syn_report()])
                .map_err(|source| Error::Write {
                    action: "sync",
                    source,
                })?;
        }
        Ok(())
    }

    /// Resolve, open, tap: the whole single-keypress flow in one call.
    pub fn run(&self, key: KeyCode, explicit: Option<&Path>) -> Result<(), Error> {
        let path = self.resolve(key, explicit)?;
        let mut device = EventDevice::open(path)?;
        debug!(device = %device.path().display(), name = ?device.name(), "opened target device");
        self.tap(&mut device, key)
    }
}
