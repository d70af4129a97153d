use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::event::KeyCode;

#[derive(Debug, Error)]
pub enum Error {
    /// A discovery directory could not be read at all.
    #[error("cannot read directory '{}': {source}", .dir.display())]
    Scan { dir: PathBuf, source: io::Error },
    /// Every discovery strategy came up empty.
    #[error("no keyboard device found automatically (keycode {keycode})")]
    NoDevice { keycode: KeyCode },
    /// The chosen device node could not be opened for writing.
    #[error("cannot open '{}': {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    /// A write to the device node failed or was cut short.
    #[error("failed to send {action} event: {source}")]
    Write {
        action: &'static str,
        source: io::Error,
    },
}
