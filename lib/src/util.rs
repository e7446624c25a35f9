use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tempfile::TempDir;

use crate::consts::*;
use crate::errors::*;

macro_rules! make_log_macro {
    (@wdoll $macro_name:ident, $block_name:literal, ($dol:tt)) => {
        #[allow(dead_code)]
        macro_rules! $macro_name {
            ($dol($args:tt)+) => {
                ::log::$macro_name!(target: $block_name, $dol($args)+)
            };
        }
    };
    ($macro_name:ident, $block_name:literal) => {
        make_log_macro!(@wdoll $macro_name, $block_name, ($));
    };
}

/// Read a whole attribute file, dropping the trailing newline the kernel
/// appends.
pub fn read_file(path: impl AsRef<Path>) -> std::io::Result<String> {
    let content = fs::read_to_string(path)?;
    Ok(content.trim_end().to_string())
}

/// Look for `<config dir>/touchlight/<filename>.<extension>`.
pub fn find_file(filename: &str, extension: Option<&str>) -> Option<PathBuf> {
    let mut file = dirs::config_dir()?.join("touchlight").join(filename);
    if let Some(extension) = extension {
        file.set_extension(extension);
    }
    file.exists().then_some(file)
}

pub fn deserialize_toml_file<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let contents = read_file(path)?;

    toml::from_str(&contents).map_err(|err| {
        #[allow(deprecated)]
        let location_msg = err
            .span()
            .map(|span| {
                let line = 1 + contents.as_bytes()[..(span.start)]
                    .iter()
                    .filter(|b| **b == b'\n')
                    .count();
                format!(" at line {line}")
            })
            .unwrap_or_default();
        BacklightError::Other(format!(
            "Failed to deserialize TOML file {}{}: {}",
            path.display(),
            location_msg,
            err.message()
        ))
    })
}

/// A temporary directory populated with the Raspberry Pi attribute files,
/// for tests and emulation.
///
/// The directory and its contents are removed on drop.
///
/// ```no_run
/// use touchlight::{BacklightBuilder, FakeBacklightSysfs};
///
/// let sysfs = FakeBacklightSysfs::new()?;
/// let mut backlight = BacklightBuilder::new()
///     .with_sysfs_path(sysfs.path())
///     .build()?;
/// backlight.set_brightness(50)?;
/// # Ok::<(), touchlight::BacklightError>(())
/// ```
pub struct FakeBacklightSysfs {
    dir: TempDir,
}

impl FakeBacklightSysfs {
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::tempdir()?;
        for (filename, value) in [
            (FILE_BL_POWER, 0),
            (FILE_BRIGHTNESS, 255),
            (FILE_MAX_BRIGHTNESS, 255),
        ] {
            fs::write(dir.path().join(filename), value.to_string())?;
        }
        // The real driver mirrors writes into actual_brightness; a symlink
        // keeps the two files in sync without any machinery.
        std::os::unix::fs::symlink(
            dir.path().join(FILE_BRIGHTNESS),
            dir.path().join(FILE_ACTUAL_BRIGHTNESS),
        )?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
