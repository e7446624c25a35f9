use crate::board::BoardType;
use crate::errors::*;
use crate::util::*;

use std::path::PathBuf;

use serde::Deserialize;
use serde::Deserializer;
use smart_default::SmartDefault;

make_log_macro!(debug, "config");

/// Defaults read from `<config dir>/touchlight/config.toml`, all of which
/// the builder and the CLI can override.
#[derive(Deserialize, Clone, Debug, SmartDefault)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct BacklightConfig {
    /// Overrides board detection.
    pub board_type: Option<BoardType>,

    /// Overrides the board's default attribute directory.
    pub sysfs_path: Option<PathBuf>,

    /// Default fade duration in seconds.
    #[default(0.0)]
    #[serde(deserialize_with = "deserialize_fade_duration")]
    pub fade_duration: f64,

    /// Whether power toggles on boards without a `bl_power` switch ride
    /// the fade loop instead of jumping.
    #[default(false)]
    pub fade_power: bool,

    /// The driver sometimes leaves an attribute file empty mid-update;
    /// reads are retried this many extra times before giving up.
    #[default(3)]
    pub read_retries: u32,
}

fn deserialize_fade_duration<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let fade_duration: f64 = Deserialize::deserialize(deserializer)?;
    debug!("{:?}", fade_duration);

    if !fade_duration.is_finite() || fade_duration < 0.0 {
        return Err(serde::de::Error::invalid_value(
            serde::de::Unexpected::Float(fade_duration),
            &"a non-negative number of seconds",
        ));
    }

    Ok(fade_duration)
}

impl BacklightConfig {
    pub fn new() -> Result<Self> {
        if let Some(config_path) = find_file("config", Some("toml")) {
            debug!("loading {}", config_path.display());
            deserialize_toml_file(config_path)
        } else {
            Ok(BacklightConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = BacklightConfig::default();
        assert_eq!(config.board_type, None);
        assert_eq!(config.sysfs_path, None);
        assert_eq!(config.fade_duration, 0.0);
        assert!(!config.fade_power);
        assert_eq!(config.read_retries, 3);
    }

    #[test]
    fn parse_full_config() {
        let config: BacklightConfig = toml::from_str(
            r#"
            board_type = "tinker-board-2"
            sysfs_path = "/tmp/fake-sysfs"
            fade_duration = 0.5
            fade_power = true
            read_retries = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.board_type, Some(BoardType::TinkerBoard2));
        assert_eq!(config.sysfs_path, Some(PathBuf::from("/tmp/fake-sysfs")));
        assert_eq!(config.fade_duration, 0.5);
        assert!(config.fade_power);
        assert_eq!(config.read_retries, 10);
    }

    #[test]
    fn negative_fade_duration_is_rejected() {
        assert!(toml::from_str::<BacklightConfig>("fade_duration = -1.0").is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<BacklightConfig>("fade_seconds = 1.0").is_err());
    }

    #[test]
    fn unknown_board_type_is_rejected() {
        assert!(toml::from_str::<BacklightConfig>(r#"board_type = "commodore-64""#).is_err());
    }
}
