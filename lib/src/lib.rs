#![warn(clippy::match_same_arms)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::unnecessary_wraps)]

//! Get and set power and brightness of touchscreen display backlights.
//!
//! Supports the official Raspberry Pi 7" touch display, the Asus Tinker
//! Board and Tinker Board 2 panel, and the Microsoft Surface RT. The board
//! family decides which sysfs attribute files are used and how the power
//! state is encoded; everything else is shared.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use touchlight::BacklightBuilder;
//!
//! # fn main() -> Result<(), touchlight::BacklightError> {
//! let mut backlight = BacklightBuilder::new().build()?;
//! backlight.set_brightness(75)?;
//!
//! // Fade to full brightness over half a second.
//! backlight.fade(Duration::from_millis(500)).set_brightness(100)?;
//!
//! backlight.set_power(false)?;
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod util;
mod backlight;
mod board;
mod config;
mod consts;
mod errors;

use std::env;
use std::path::{Path, PathBuf};

pub use crate::backlight::{Backlight, FadeScope};
pub use crate::board::BoardType;
pub use crate::config::BacklightConfig;
pub use crate::errors::BacklightError;
pub use crate::util::FakeBacklightSysfs;

use crate::consts::*;
use crate::errors::*;
use crate::util::read_file;

make_log_macro!(debug, "touchlight");

/// Used to construct [`Backlight`].
#[derive(Default)]
pub struct BacklightBuilder<'a> {
    sysfs_path: Option<&'a Path>,
    board_type: Option<BoardType>,
    config: Option<BacklightConfig>,
}

impl<'a> BacklightBuilder<'a> {
    /// Create a new [`BacklightBuilder`].
    pub fn new() -> Self {
        BacklightBuilder::default()
    }

    /// Defaults to the board family's usual attribute directory. Pass
    /// `:emulator:` to target a running backlight emulator instead.
    pub fn with_sysfs_path(mut self, sysfs_path: &'a Path) -> Self {
        self.sysfs_path = Some(sysfs_path);
        self
    }

    /// Defaults to the config file's `board_type`, then device-tree
    /// detection, then [`BoardType::RaspberryPi`].
    pub fn with_board_type(mut self, board_type: BoardType) -> Self {
        self.board_type = Some(board_type);
        self
    }

    /// Defaults to [`BacklightConfig::new()`].
    pub fn with_config(mut self, config: BacklightConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Returns the constructed [`Backlight`] instance.
    ///
    /// Boards that publish their brightness ceiling perform one read of
    /// `max_brightness` here; nothing else touches the filesystem.
    pub fn build(self) -> Result<Backlight> {
        let config = match self.config {
            Some(config) => config,
            None => BacklightConfig::new()?,
        };

        let mut board_type = self
            .board_type
            .or(config.board_type)
            .or_else(BoardType::detect)
            .unwrap_or_default();

        let sysfs_path = self
            .sysfs_path
            .map(Path::to_path_buf)
            .or_else(|| config.sysfs_path.clone());
        let sysfs_path = match sysfs_path {
            Some(path) if path.as_os_str() == EMULATOR_MAGIC_STRING => {
                // The emulator only fakes the Raspberry Pi attribute files.
                board_type = BoardType::RaspberryPi;
                emulator_sysfs_path()?
            }
            Some(path) => path,
            None => board_type.default_sysfs_path(),
        };

        debug!(
            "controlling {} as a {} backlight",
            sysfs_path.display(),
            board_type
        );
        Backlight::new(sysfs_path, board_type, &config)
    }
}

/// Locate the fake sysfs directory of a running emulator through the
/// record file it drops into the temp directory.
fn emulator_sysfs_path() -> Result<PathBuf> {
    let record = env::temp_dir().join(EMULATOR_RECORD_FILE);
    if !record.exists() {
        return Err(BacklightError::EmulatorNotRunning(record));
    }
    Ok(PathBuf::from(read_file(&record)?))
}
