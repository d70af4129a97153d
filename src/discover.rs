//! Locating a keyboard device node to write to.
//!
//! Two strategies mirror what the kernel and udev give us for free: probing every
//! `/dev/input/event*` node for the key we are about to send, and falling back to the
//! stable `by-path` symlink names udev tags with `-event-kbd`.

use std::ffi::OsStr;
use std::fs::{self, File};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::capability::KeyBitmap;
use crate::error::Error;
use crate::event::KeyCode;

/// Default location of evdev character devices.
pub const INPUT_DIR: &str = "/dev/input";
/// Default location of the udev-maintained stable-name symlinks.
pub const INPUT_BY_PATH_DIR: &str = "/dev/input/by-path";

/// Substring udev puts in by-path names that point at keyboard-class event devices.
const KEYBOARD_MARKER: &str = "event-kbd";
/// Substring naming the character devices evdev itself registers.
const EVENT_MARKER: &str = "event";

/// A path to a device node, bounded to the platform's `PATH_MAX`.
///
/// Anything longer could never name an openable file; rather than erroring, paths over
/// the bound are truncated to their first `PATH_MAX` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DevicePath(PathBuf);

impl DevicePath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let bytes = path.as_os_str().as_bytes();
        if bytes.len() <= libc::PATH_MAX as usize {
            return Self(path);
        }
        let truncated = OsStr::from_bytes(&bytes[..libc::PATH_MAX as usize]);
        Self(truncated.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for DevicePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// How to locate a keyboard device when no explicit path is given.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum DiscoveryStrategy {
    /// Only look for a `*-event-kbd` name under the by-path directory.
    ByPathOnly,
    /// Probe every event node for the requested key first, then fall back to the
    /// by-path names.
    #[default]
    CapabilityThenByPath,
}

/// Scans `dir` for the first entry whose name marks it as a keyboard-class device.
///
/// Returns `Ok(None)` when the directory holds no such entry. Fails only if the
/// directory itself cannot be read.
pub fn by_path_scan(dir: &Path) -> Result<Option<DevicePath>, Error> {
    let entries = fs::read_dir(dir).map_err(|source| Error::Scan {
        dir: dir.to_owned(),
        source,
    })?;

    for entry in entries.flatten() {
        if entry.file_name().to_string_lossy().contains(KEYBOARD_MARKER) {
            return Ok(Some(DevicePath::new(entry.path())));
        }
    }
    Ok(None)
}

/// Scans `dir` for the first event device whose capability bitmap includes `key`.
///
/// Candidates are probed in directory order with a read-only open and an
/// `EVIOCGBIT(EV_KEY, ..)` query; nodes that cannot be opened or probed are skipped.
/// Returns `Ok(None)` when no candidate reports the key. Fails only if the directory
/// itself cannot be read.
pub fn capability_scan(dir: &Path, key: KeyCode) -> Result<Option<DevicePath>, Error> {
    let entries = fs::read_dir(dir).map_err(|source| Error::Scan {
        dir: dir.to_owned(),
        source,
    })?;

    for entry in entries.flatten() {
        if !entry.file_name().to_string_lossy().contains(EVENT_MARKER) {
            continue;
        }
        let path = entry.path();
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) => {
                debug!(device = %path.display(), error = %err, "skipping unopenable node");
                continue;
            }
        };
        match KeyBitmap::from_device(&file) {
            Ok(keys) if keys.contains(key) => {
                debug!(
                    device = %path.display(),
                    name = ?crate::device::device_name(&file),
                    keycode = key.code(),
                    "found device supporting keycode"
                );
                return Ok(Some(DevicePath::new(path)));
            }
            Ok(_) => {}
            Err(err) => {
                debug!(device = %path.display(), error = %err, "capability query failed, skipping");
            }
        }
    }
    Ok(None)
}

/// Resolves the device node to write to, using the production directories.
///
/// An explicit path short-circuits discovery entirely and is used as given (modulo the
/// `PATH_MAX` bound), even if nothing exists at that location.
pub fn resolve(
    explicit: Option<&Path>,
    key: KeyCode,
    strategy: DiscoveryStrategy,
) -> Result<DevicePath, Error> {
    resolve_in(
        explicit,
        key,
        strategy,
        Path::new(INPUT_DIR),
        Path::new(INPUT_BY_PATH_DIR),
    )
}

/// [`resolve`], but against caller-supplied directories instead of `/dev/input`.
pub fn resolve_in(
    explicit: Option<&Path>,
    key: KeyCode,
    strategy: DiscoveryStrategy,
    input_dir: &Path,
    by_path_dir: &Path,
) -> Result<DevicePath, Error> {
    if let Some(path) = explicit {
        return Ok(DevicePath::new(path));
    }

    if strategy == DiscoveryStrategy::CapabilityThenByPath {
        match capability_scan(input_dir, key) {
            Ok(Some(path)) => return Ok(path),
            Ok(None) => {
                debug!(keycode = key.code(), "no device reports the keycode, trying by-path names")
            }
            Err(err) => debug!(error = %err, "capability scan failed, trying by-path names"),
        }
    }

    by_path_scan(by_path_dir)?.ok_or(Error::NoDevice { keycode: key })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_paths_pass_through_unchanged() {
        let path = DevicePath::new("/dev/input/event3");
        assert_eq!(path.as_path(), Path::new("/dev/input/event3"));
    }

    #[test]
    fn overlong_paths_truncate_to_path_max() {
        let long = format!("/dev/input/{}", "e".repeat(2 * libc::PATH_MAX as usize));
        let path = DevicePath::new(long.clone());

        let max = libc::PATH_MAX as usize;
        assert_eq!(path.as_path().as_os_str().len(), max);
        assert_eq!(path.as_path().as_os_str().as_bytes(), &long.as_bytes()[..max]);
    }
}
