//! Virtual keyboard emulation via uinput.
//!
//! This is how the hardware-backed tests exercise discovery and injection without a
//! physical keyboard attached.

use std::ffi::CString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::{fs::OpenOptionsExt, io::AsRawFd};
use std::path::{Path, PathBuf};

use libc::O_NONBLOCK;

use crate::capability::KeyBitmap;
use crate::compat::{input_id, uinput_setup, UINPUT_MAX_NAME_SIZE};
use crate::event::{EventType, InputEvent, SYN_REPORT};
use crate::{nix_err, sys};

const UINPUT_PATH: &str = "/dev/uinput";
const SYS_VIRTUAL_INPUT: &str = "/sys/devices/virtual/input";
const BUS_VIRTUAL: u16 = 0x06;

#[derive(Debug)]
pub struct VirtualKeyboardBuilder<'a> {
    file: File,
    name: &'a str,
}

impl<'a> VirtualKeyboardBuilder<'a> {
    pub fn new() -> io::Result<Self> {
        let mut options = OpenOptions::new();

        // Open in write-only, in nonblocking mode.
        let file = options
            .write(true)
            .custom_flags(O_NONBLOCK)
            .open(UINPUT_PATH)?;

        Ok(VirtualKeyboardBuilder {
            file,
            name: Default::default(),
        })
    }

    pub fn name(mut self, name: &'a str) -> Self {
        self.name = name;
        self
    }

    /// Registers the key capabilities the device will advertise.
    pub fn with_keys(self, keys: &KeyBitmap) -> io::Result<Self> {
        unsafe {
            sys::ui_set_evbit(
                self.file.as_raw_fd(),
                EventType::KEY.0 as nix::sys::ioctl::ioctl_param_type,
            )
        }
        .map_err(nix_err)?;

        for key in keys.iter() {
            unsafe {
                sys::ui_set_keybit(
                    self.file.as_raw_fd(),
                    key.code() as nix::sys::ioctl::ioctl_param_type,
                )
            }
            .map_err(nix_err)?;
        }

        Ok(self)
    }

    pub fn build(self) -> io::Result<VirtualKeyboard> {
        let c_name = CString::new(self.name)?;
        let c_name_bytes = c_name.as_bytes_with_nul();
        if c_name_bytes.len() > UINPUT_MAX_NAME_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "uinput device name too long",
            ));
        }
        let mut name = [0 as libc::c_char; UINPUT_MAX_NAME_SIZE];
        for (dst, &src) in name.iter_mut().zip(c_name_bytes) {
            *dst = src as libc::c_char;
        }

        let setup = uinput_setup {
            id: input_id {
                bustype: BUS_VIRTUAL,
                vendor: 0x1234,  /* sample vendor */
                product: 0x5678, /* sample product */
                version: 0x111,
            },
            name,
            ff_effects_max: 0,
        };

        unsafe { sys::ui_dev_setup(self.file.as_raw_fd(), &setup) }.map_err(nix_err)?;
        unsafe { sys::ui_dev_create(self.file.as_raw_fd()) }.map_err(nix_err)?;

        Ok(VirtualKeyboard { file: self.file })
    }
}

/// A uinput-backed keyboard. The kernel tears the device down again when this handle
/// (and with it the uinput descriptor) is dropped.
pub struct VirtualKeyboard {
    file: File,
}

impl VirtualKeyboard {
    /// Posts events to the virtual device, followed by a `SYN_REPORT` so the kernel
    /// delivers the batch.
    pub fn emit(&mut self, events: &[InputEvent]) -> io::Result<()> {
        let bytes = unsafe { crate::cast_to_bytes(events) };
        self.file.write_all(bytes)?;

        let syn = [InputEvent::new(EventType::SYNCHRONIZATION, SYN_REPORT, 0)];
        let bytes = unsafe { crate::cast_to_bytes(&syn) };
        self.file.write_all(bytes)
    }

    /// The kernel-assigned sysfs name of the backing input device, e.g. `input123`.
    pub fn sysname(&self) -> io::Result<String> {
        let mut buf = [0u8; 64];
        unsafe { sys::ui_get_sysname(self.file.as_raw_fd(), &mut buf) }.map_err(nix_err)?;
        let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
        Ok(String::from_utf8_lossy(&buf[..end]).into_owned())
    }

    /// The `/dev/input/eventN` node registered for this device.
    ///
    /// Registration happens asynchronously after `UI_DEV_CREATE`, so right after
    /// building the device this can still report `NotFound`; callers should retry or
    /// sleep briefly first.
    pub fn dev_node(&self) -> io::Result<PathBuf> {
        let sysdir = Path::new(SYS_VIRTUAL_INPUT).join(self.sysname()?);
        for entry in fs::read_dir(sysdir)? {
            let entry = entry?;
            let name = entry.file_name();
            if name.to_string_lossy().starts_with("event") {
                return Ok(Path::new(crate::discover::INPUT_DIR).join(name));
            }
        }
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            "virtual device has no event node yet",
        ))
    }
}
