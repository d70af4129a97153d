//! The raw event record written to an evdev node, and the newtypes around its fields.

use std::fmt;
use std::time::SystemTime;

use crate::compat::input_event;
use crate::{systime_to_timeval, timeval_to_systime};

/// Event types understood by this crate.
///
/// This is implemented as a newtype around the u16 "type" field of `input_event`.
/// The kernel defines many more; an injector only ever emits these two.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventType(pub u16);

impl EventType {
    /// A bookkeeping event. Terminates a batch of events so the kernel delivers them together.
    pub const SYNCHRONIZATION: Self = Self(0x00);
    /// A key changed state. Value 1 means the key went down, 0 means it came back up.
    pub const KEY: Self = Self(0x01);
}

impl fmt::Debug for EventType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::SYNCHRONIZATION => f.write_str("SYNCHRONIZATION"),
            Self::KEY => f.write_str("KEY"),
            Self(other) => f.debug_tuple("EventType").field(&other).finish(),
        }
    }
}

/// The event code of a `SYN_REPORT` synchronization marker.
pub const SYN_REPORT: u16 = 0;

/// A numeric evdev key code, e.g. 125 for `KEY_LEFTMETA`.
///
/// The full table lives in the kernel's `include/uapi/linux/input-event-codes.h`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    pub const fn code(self) -> u16 {
        self.0
    }

    /// Parses a key code out of command-line text the way C's `atoi` would, followed by
    /// the implicit conversion to the u16 `code` field: leading ASCII whitespace and an
    /// optional sign are consumed, digits are read until the first non-digit, and the
    /// result is truncated to 16 bits. Text with no leading digits yields code 0.
    pub fn parse_lossy(text: &str) -> Self {
        let rest = text.trim_start_matches(|c: char| c.is_ascii_whitespace());
        let (negative, digits) = match rest.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, rest.strip_prefix('+').unwrap_or(rest)),
        };

        // Saturate like strtol so absurdly long inputs still truncate the same way.
        let mut value: i64 = 0;
        for c in digits.chars() {
            let Some(digit) = c.to_digit(10) else { break };
            value = value.saturating_mul(10).saturating_add(digit as i64);
        }
        if negative {
            value = -value;
        }

        Self(value as u16)
    }
}

impl fmt::Debug for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("KeyCode").field(&self.0).finish()
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A wrapper around the kernel's `input_event` struct, bit-for-bit identical to what an
/// evdev node accepts on write.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct InputEvent(input_event);

impl InputEvent {
    /// Creates a new event with a zeroed timestamp. The kernel stamps events itself when
    /// they pass through a uinput device, so this is what virtual devices should emit.
    pub fn new(type_: EventType, code: u16, value: i32) -> Self {
        Self(input_event {
            time: libc::timeval {
                tv_sec: 0,
                tv_usec: 0,
            },
            type_: type_.0,
            code,
            value,
        })
    }

    /// Creates a new event stamped with the current wall-clock time, which is what the
    /// evdev write path expects from userspace.
    pub fn new_now(type_: EventType, code: u16, value: i32) -> Self {
        Self(input_event {
            time: systime_to_timeval(&SystemTime::now()),
            type_: type_.0,
            code,
            value,
        })
    }

    /// A key state change: value 1 for press, 0 for release.
    pub fn key(key: KeyCode, pressed: bool) -> Self {
        Self::new_now(EventType::KEY, key.code(), pressed as i32)
    }

    /// A `SYN_REPORT` marker, telling the kernel the preceding events form a complete packet.
    pub fn syn_report() -> Self {
        Self::new_now(EventType::SYNCHRONIZATION, SYN_REPORT, 0)
    }

    #[inline]
    pub fn timestamp(&self) -> SystemTime {
        timeval_to_systime(&self.0.time)
    }

    #[inline]
    pub fn event_type(&self) -> EventType {
        EventType(self.0.type_)
    }

    #[inline]
    pub fn code(&self) -> u16 {
        self.0.code
    }

    #[inline]
    pub fn value(&self) -> i32 {
        self.0.value
    }
}

impl fmt::Debug for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("InputEvent")
            .field("time", &self.timestamp())
            .field("type", &self.event_type())
            .field("code", &self.code())
            .field("value", &self.value())
            .finish()
    }
}
