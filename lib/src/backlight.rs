use std::fs;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::thread::sleep;
use std::time::Duration;

use crate::board::{BoardType, Ceiling, PowerControl};
use crate::config::BacklightConfig;
use crate::consts::*;
use crate::errors::*;
use crate::util::read_file;

make_log_macro!(debug, "backlight");

/// Controls power and brightness of a display backlight through its sysfs
/// attribute directory.
///
/// Brightness is exposed as a percentage (0-100) and translated to the
/// board's raw scale internally. Each attribute access opens, reads or
/// writes, and closes a single file; no handles are held between calls.
pub struct Backlight {
    sysfs_path: PathBuf,
    board_type: BoardType,
    max_brightness: u32,
    fade_duration: Duration,
    fade_power: bool,
    read_retries: u32,
}

impl Backlight {
    pub(crate) fn new(
        sysfs_path: PathBuf,
        board_type: BoardType,
        config: &BacklightConfig,
    ) -> Result<Self> {
        let mut s = Self {
            sysfs_path,
            board_type,
            max_brightness: 0,
            // Config value is validated non-negative and finite on load.
            fade_duration: Duration::from_secs_f64(config.fade_duration),
            fade_power: config.fade_power,
            read_retries: config.read_retries,
        };
        s.max_brightness = match board_type.ceiling() {
            Ceiling::Fixed(max_brightness) => max_brightness,
            Ceiling::FromAttribute => {
                // Cached for the controller's lifetime, it never changes on
                // a running system.
                let max_brightness = s.read_raw(FILE_MAX_BRIGHTNESS)?;
                if max_brightness == 0 {
                    return Err(BacklightError::InvalidCeiling(max_brightness));
                }
                max_brightness
            }
        };
        Ok(s)
    }

    /// Read an attribute file and parse it as an integer.
    ///
    /// The driver sometimes leaves the file empty while it updates, so a
    /// failed parse is re-read up to `read_retries` more times before the
    /// whole read fails.
    fn read_raw(&self, name: &str) -> Result<u32> {
        let path = self.sysfs_path.join(name);
        let tries = self.read_retries + 1;
        for attempt in 1..=tries {
            let content =
                read_file(&path).map_err(|e| BacklightError::from_attribute_io(e, &path))?;
            match content.parse() {
                Ok(value) => return Ok(value),
                Err(_) => debug!("attempt {attempt} to read {} failed", path.display()),
            }
        }
        Err(BacklightError::UnreadableAttribute { path, tries })
    }

    /// Write the decimal form of `value` into an attribute file.
    fn write_raw(&self, name: &str, value: u32) -> Result<()> {
        let path = self.sysfs_path.join(name);
        fs::write(&path, value.to_string())
            .map_err(|e| BacklightError::from_attribute_io(e, &path))
    }

    /// Raw to percent, rounding half away from zero.
    pub(crate) fn normalize(&self, raw: u32) -> u8 {
        let percent = (f64::from(raw) / f64::from(self.max_brightness) * 100.0).round();
        percent.clamp(0.0, 100.0) as u8
    }

    /// Percent to raw, rounding half away from zero.
    pub(crate) fn denormalize(&self, percent: u8) -> u32 {
        let raw = (f64::from(percent) * f64::from(self.max_brightness) / 100.0).round();
        raw.clamp(0.0, f64::from(self.max_brightness)) as u32
    }

    pub fn board_type(&self) -> BoardType {
        self.board_type
    }

    /// The display brightness as a percentage.
    pub fn brightness(&self) -> Result<u8> {
        let raw = self.read_raw(self.board_type.read_attribute())?;
        Ok(self.normalize(raw))
    }

    /// Set the display brightness to a percentage.
    ///
    /// When [`fade_duration`](Self::fade_duration) is nonzero the value is
    /// approached in steps of one percentage point, blocking the calling
    /// thread for the whole duration. A zero duration writes the target
    /// directly.
    pub fn set_brightness(&mut self, value: u8) -> Result<()> {
        if value > 100 {
            return Err(BacklightError::BrightnessOutOfRange(value));
        }
        if self.fade_duration > Duration::ZERO {
            self.fade_to(value)
        } else {
            self.write_raw(self.board_type.write_attribute(), self.denormalize(value))
        }
    }

    /// Step the brightness to `target` one percentage point at a time,
    /// spreading the steps evenly over the fade duration.
    fn fade_to(&mut self, target: u8) -> Result<()> {
        let mut current = self.brightness()?;
        if current == target {
            // Nothing to step over, fall back to one direct write.
            return self.write_raw(self.board_type.write_attribute(), self.denormalize(target));
        }
        let diff = u32::from(current.abs_diff(target));
        let pause = self.fade_duration / diff;
        debug!("fading from {current} to {target} in {diff} steps of {pause:?}");
        while current != target {
            current = if current < target {
                current + 1
            } else {
                current - 1
            };
            self.write_raw(self.board_type.write_attribute(), self.denormalize(current))?;
            if current != target {
                sleep(pause);
            }
        }
        Ok(())
    }

    /// Whether the display is powered on.
    pub fn power(&self) -> Result<bool> {
        match self.board_type.power_control() {
            // 0 is on, nonzero is off.
            PowerControl::SwitchAttribute => Ok(self.read_raw(FILE_BL_POWER)? == 0),
            PowerControl::ZeroBrightness => Ok(self.read_raw(FILE_TINKER_MCU_BL)? != 0),
        }
    }

    /// Turn the display on or off.
    ///
    /// Boards without a `bl_power` switch emulate power through the
    /// brightness register: on means full brightness, off means zero, and
    /// the previous level is not remembered. The transition jumps unless
    /// the `fade_power` config option is set.
    pub fn set_power(&mut self, on: bool) -> Result<()> {
        match self.board_type.power_control() {
            PowerControl::SwitchAttribute => {
                self.write_raw(FILE_BL_POWER, if on { 0 } else { 1 })
            }
            PowerControl::ZeroBrightness => {
                let percent = if on { 100 } else { 0 };
                if self.fade_power && self.fade_duration > Duration::ZERO {
                    self.fade_to(percent)
                } else {
                    self.write_raw(self.board_type.write_attribute(), self.denormalize(percent))
                }
            }
        }
    }

    /// The brightness fade duration, zero by default.
    pub fn fade_duration(&self) -> Duration {
        self.fade_duration
    }

    pub fn set_fade_duration(&mut self, duration: Duration) {
        self.fade_duration = duration;
    }

    /// Temporarily override the fade duration for the extent of the
    /// returned scope. The previous duration is restored when the scope is
    /// dropped, on every exit path.
    ///
    /// ```no_run
    /// use std::time::Duration;
    /// use touchlight::BacklightBuilder;
    ///
    /// let mut backlight = BacklightBuilder::new().build()?;
    /// {
    ///     let mut backlight = backlight.fade(Duration::from_millis(500));
    ///     backlight.set_brightness(100)?;
    /// }
    /// assert_eq!(backlight.fade_duration(), Duration::ZERO);
    /// # Ok::<(), touchlight::BacklightError>(())
    /// ```
    pub fn fade(&mut self, duration: Duration) -> FadeScope<'_> {
        let previous = self.fade_duration;
        self.fade_duration = duration;
        FadeScope {
            backlight: self,
            previous,
        }
    }
}

/// Scoped fade-duration override returned by [`Backlight::fade`].
///
/// Dereferences to the underlying [`Backlight`]; restores the previous
/// fade duration unconditionally on drop.
pub struct FadeScope<'a> {
    backlight: &'a mut Backlight,
    previous: Duration,
}

impl Deref for FadeScope<'_> {
    type Target = Backlight;

    fn deref(&self) -> &Backlight {
        self.backlight
    }
}

impl DerefMut for FadeScope<'_> {
    fn deref_mut(&mut self) -> &mut Backlight {
        self.backlight
    }
}

impl Drop for FadeScope<'_> {
    fn drop(&mut self) {
        self.backlight.fade_duration = self.previous;
    }
}
