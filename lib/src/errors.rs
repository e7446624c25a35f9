use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type returned from functions that can have our `Error`s.
pub type Result<T, E = BacklightError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BacklightError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error(
        "permission denied for {}: run as root or grant your user write \
         access to the backlight sysfs with a udev rule",
        .path.display()
    )]
    PermissionDenied { path: PathBuf },

    #[error("brightness must be in range 0-100, got {0}")]
    BrightnessOutOfRange(u8),

    #[error("fade duration must be a non-negative number of seconds, got {0}")]
    InvalidDuration(f64),

    #[error("{} did not contain an integer after {} reads", .path.display(), .tries)]
    UnreadableAttribute { path: PathBuf, tries: u32 },

    #[error("max_brightness reported {0}, expected a positive value")]
    InvalidCeiling(u32),

    #[error("emulator seems to be not running, {} not found", .0.display())]
    EmulatorNotRunning(PathBuf),

    #[error("unknown board type {0:?}")]
    UnknownBoardType(String),

    #[error("{0}")]
    Other(String),
}

impl BacklightError {
    /// Translate an attribute file I/O failure, keeping the access-control
    /// case distinct so callers get remediation guidance.
    pub(crate) fn from_attribute_io(err: std::io::Error, path: &Path) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            BacklightError::PermissionDenied {
                path: path.to_path_buf(),
            }
        } else {
            BacklightError::Io(err)
        }
    }
}
