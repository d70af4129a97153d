//! Inject a single keypress into a Linux evdev device node.
//!
//! The kernel's "evdev" subsystem exposes input devices to userspace as character
//! devices under `/dev/input`. The same nodes that deliver events to readers also
//! accept writes: a well-formed `input_event` written to one is fed back into the
//! input core and delivered to every reader of the device, exactly as if the hardware
//! had produced it. This crate drives that write path for the narrow case of a single
//! key: a press, a release, and the `SYN_REPORT` markers that tell the kernel each
//! step is a complete packet.
//!
//! Finding something keyboard-shaped to write to is the other half of the job.
//! [`resolve`] first probes every node under `/dev/input` with an
//! `EVIOCGBIT(EV_KEY, ..)` query and takes the first one claiming support for the
//! requested key, then falls back to the stable `*-event-kbd` names udev maintains
//! under `/dev/input/by-path`. An explicit path skips discovery entirely.
//!
//! ```no_run
//! use sendkey::{InjectorConfig, KeyCode, KeyInjector};
//!
//! # fn main() -> Result<(), sendkey::Error> {
//! // Tap KEY_LEFTMETA (code 125) on whatever keyboard discovery turns up.
//! let injector = KeyInjector::new(InjectorConfig::default());
//! injector.run(KeyCode::new(125), None)?;
//! # Ok(())
//! # }
//! ```
//!
//! Writing to evdev nodes usually requires membership in the `input` group or root.

#![cfg(any(unix, target_os = "android"))]

mod capability;
mod compat;
mod device;
mod discover;
mod error;
mod event;
mod inject;
mod sys;
pub mod uinput;

pub use crate::capability::KeyBitmap;
pub use crate::device::EventDevice;
pub use crate::discover::{
    by_path_scan, capability_scan, resolve, resolve_in, DevicePath, DiscoveryStrategy,
    INPUT_BY_PATH_DIR, INPUT_DIR,
};
pub use crate::error::Error;
pub use crate::event::{EventType, InputEvent, KeyCode, SYN_REPORT};
pub use crate::inject::{InjectorConfig, KeyInjector};

use std::io;
use std::mem;
use std::time::{Duration, SystemTime};

fn nix_err(err: nix::Error) -> io::Error {
    io::Error::from_raw_os_error(err as i32)
}

/// A safe Rust version of clock_gettime against CLOCK_REALTIME
fn systime_to_timeval(time: &SystemTime) -> libc::timeval {
    let (sign, dur) = match time.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(dur) => (1, dur),
        Err(e) => (-1, e.duration()),
    };

    libc::timeval {
        tv_sec: dur.as_secs() as libc::time_t * sign,
        tv_usec: dur.subsec_micros() as libc::suseconds_t,
    }
}

fn timeval_to_systime(tv: &libc::timeval) -> SystemTime {
    let dur = Duration::new(tv.tv_sec.unsigned_abs(), tv.tv_usec as u32 * 1000);
    if tv.tv_sec >= 0 {
        SystemTime::UNIX_EPOCH + dur
    } else {
        SystemTime::UNIX_EPOCH - dur
    }
}

/// SAFETY: T must not have any padding or otherwise uninitialized bytes inside of it
pub(crate) unsafe fn cast_to_bytes<T: ?Sized>(mem: &T) -> &[u8] {
    std::slice::from_raw_parts(mem as *const T as *const u8, mem::size_of_val(mem))
}
