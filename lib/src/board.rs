use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::consts::*;
use crate::errors::*;
use crate::util::read_file;

make_log_macro!(debug, "board");

/// How a board family obtains its raw brightness ceiling.
pub(crate) enum Ceiling {
    /// Read once from the `max_brightness` attribute at construction.
    FromAttribute,
    /// Fixed by firmware convention, no I/O needed.
    Fixed(u32),
}

/// How a board family encodes the panel power state.
pub(crate) enum PowerControl {
    /// Dedicated `bl_power` attribute. Polarity is inverted: 0 is on.
    SwitchAttribute,
    /// No switch attribute; zero brightness means off.
    ZeroBrightness,
}

/// The display/controller hardware variant, determining which attribute
/// files exist and how power is encoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum BoardType {
    #[default]
    #[serde(rename = "raspberry-pi")]
    RaspberryPi,
    #[serde(rename = "tinker-board")]
    TinkerBoard,
    #[serde(rename = "tinker-board-2")]
    TinkerBoard2,
    #[serde(rename = "microsoft-surface-rt")]
    MicrosoftSurfaceRt,
}

impl BoardType {
    /// Attribute file that accepts the raw brightness target.
    pub(crate) fn write_attribute(self) -> &'static str {
        match self {
            BoardType::RaspberryPi | BoardType::MicrosoftSurfaceRt => FILE_BRIGHTNESS,
            BoardType::TinkerBoard | BoardType::TinkerBoard2 => FILE_TINKER_MCU_BL,
        }
    }

    /// Attribute file holding the brightness the driver actually applied.
    pub(crate) fn read_attribute(self) -> &'static str {
        match self {
            BoardType::RaspberryPi | BoardType::MicrosoftSurfaceRt => FILE_ACTUAL_BRIGHTNESS,
            BoardType::TinkerBoard | BoardType::TinkerBoard2 => FILE_TINKER_MCU_BL,
        }
    }

    pub(crate) fn ceiling(self) -> Ceiling {
        match self {
            BoardType::RaspberryPi | BoardType::MicrosoftSurfaceRt => Ceiling::FromAttribute,
            BoardType::TinkerBoard | BoardType::TinkerBoard2 => {
                Ceiling::Fixed(TINKER_MCU_MAX_BRIGHTNESS)
            }
        }
    }

    pub(crate) fn power_control(self) -> PowerControl {
        match self {
            BoardType::RaspberryPi | BoardType::MicrosoftSurfaceRt => PowerControl::SwitchAttribute,
            BoardType::TinkerBoard | BoardType::TinkerBoard2 => PowerControl::ZeroBrightness,
        }
    }

    /// Whether the board has a dedicated `bl_power` switch attribute.
    pub fn has_power_switch(self) -> bool {
        matches!(self.power_control(), PowerControl::SwitchAttribute)
    }

    /// Default attribute directory for this board family.
    pub fn default_sysfs_path(self) -> PathBuf {
        match self {
            BoardType::RaspberryPi => {
                if Path::new(RPI_SYSFS_PATH_I2C).exists() {
                    PathBuf::from(RPI_SYSFS_PATH_I2C)
                } else {
                    PathBuf::from(RPI_SYSFS_PATH)
                }
            }
            BoardType::TinkerBoard => PathBuf::from(TINKER_BOARD_SYSFS_PATH),
            BoardType::TinkerBoard2 => PathBuf::from(TINKER_BOARD_2_SYSFS_PATH),
            BoardType::MicrosoftSurfaceRt => PathBuf::from(SURFACE_RT_SYSFS_PATH),
        }
    }

    /// Guess the board family from the device-tree model description.
    /// Returns `None` on machines without one or with an unknown model.
    pub fn detect() -> Option<BoardType> {
        let model = read_file(DEVICE_TREE_MODEL_PATH).ok()?;
        let board_type = Self::from_model(&model);
        debug!("model {:?} detected as {:?}", model, board_type);
        board_type
    }

    // "Tinker Board 2" must be checked before "Tinker Board".
    pub(crate) fn from_model(model: &str) -> Option<BoardType> {
        if model.contains("Tinker Board 2") {
            Some(BoardType::TinkerBoard2)
        } else if model.contains("Tinker Board") {
            Some(BoardType::TinkerBoard)
        } else if model.contains("Raspberry Pi") {
            Some(BoardType::RaspberryPi)
        } else {
            None
        }
    }
}

impl FromStr for BoardType {
    type Err = BacklightError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "raspberry-pi" => Ok(BoardType::RaspberryPi),
            "tinker-board" => Ok(BoardType::TinkerBoard),
            "tinker-board-2" => Ok(BoardType::TinkerBoard2),
            "microsoft-surface-rt" => Ok(BoardType::MicrosoftSurfaceRt),
            _ => Err(BacklightError::UnknownBoardType(s.to_string())),
        }
    }
}

impl fmt::Display for BoardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardType::RaspberryPi => write!(f, "raspberry-pi"),
            BoardType::TinkerBoard => write!(f, "tinker-board"),
            BoardType::TinkerBoard2 => write!(f, "tinker-board-2"),
            BoardType::MicrosoftSurfaceRt => write!(f, "microsoft-surface-rt"),
        }
    }
}
