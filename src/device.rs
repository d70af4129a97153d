//! A write-only handle to an event device node.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::io::AsRawFd;
use std::path::Path;

use crate::discover::DevicePath;
use crate::error::Error;
use crate::event::InputEvent;
use crate::sys;

/// An event device opened for writing, the direction the kernel's event injection
/// path expects.
#[derive(Debug)]
pub struct EventDevice {
    file: File,
    path: DevicePath,
}

impl EventDevice {
    /// Opens the node write-only. The descriptor is owned by the returned handle and
    /// closed when it drops.
    pub fn open(path: DevicePath) -> Result<Self, Error> {
        match OpenOptions::new().write(true).open(path.as_path()) {
            Ok(file) => Ok(Self { file, path }),
            Err(source) => Err(Error::Open {
                path: path.into_path_buf(),
                source,
            }),
        }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// The name the driver reports, if the node answers `EVIOCGNAME`.
    pub fn name(&self) -> Option<String> {
        device_name(&self.file)
    }

    /// Writes a batch of events to the device in a single `write`.
    pub fn emit(&mut self, events: &[InputEvent]) -> io::Result<()> {
        let bytes = unsafe { crate::cast_to_bytes(events) };
        self.file.write_all(bytes)
    }
}

pub(crate) fn device_name(file: &File) -> Option<String> {
    const CAPACITY: usize = 256;
    let mut buf = vec![0; CAPACITY];
    match unsafe { sys::eviocgname(file.as_raw_fd(), buf.as_mut_slice()) } {
        Ok(len) if len > 0 && (len as usize) <= CAPACITY => {
            // The ioctl reports the number of bytes written, including the trailing NUL.
            buf.truncate(len as usize);
            if buf.pop() != Some(0) {
                return None;
            }
            Some(String::from_utf8_lossy(&buf).into_owned())
        }
        _ => None,
    }
}
