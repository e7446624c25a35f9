/// Backlight sysfs directory for the official Raspberry Pi touch display
/// on kernels that expose the panel as a plain I2C device.
pub const RPI_SYSFS_PATH_I2C: &str = "/sys/class/backlight/10-0045";

/// Backlight sysfs directory for the official Raspberry Pi touch display
/// on older kernels.
pub const RPI_SYSFS_PATH: &str = "/sys/class/backlight/rpi_backlight";

/// Backlight sysfs directory for the Asus Tinker Board.
pub const TINKER_BOARD_SYSFS_PATH: &str = "/sys/devices/platform/ff150000.i2c/i2c-3/3-0045";

/// Backlight sysfs directory for the Asus Tinker Board 2.
pub const TINKER_BOARD_2_SYSFS_PATH: &str = "/sys/devices/platform/ff3e0000.i2c/i2c-8/8-0045";

/// Backlight sysfs directory for the Microsoft Surface RT.
pub const SURFACE_RT_SYSFS_PATH: &str = "/sys/class/backlight/backlight";

/// Filename for the requested brightness level.
pub const FILE_BRIGHTNESS: &str = "brightness";

/// Filename for the brightness the driver actually applied.
pub const FILE_ACTUAL_BRIGHTNESS: &str = "actual_brightness";

/// Filename for device's max brightness.
pub const FILE_MAX_BRIGHTNESS: &str = "max_brightness";

/// Filename for the power switch. 0 is on, nonzero is off.
pub const FILE_BL_POWER: &str = "bl_power";

/// Filename for the Tinker Board MCU brightness register.
pub const FILE_TINKER_MCU_BL: &str = "tinker_mcu_bl";

/// Sysfs path sentinel that selects a running backlight emulator.
pub const EMULATOR_MAGIC_STRING: &str = ":emulator:";

/// Record file the emulator drops into the temp directory. It contains the
/// path of the fake sysfs directory.
pub const EMULATOR_RECORD_FILE: &str = "rpi-backlight-emulator.sysfs";

/// Device-tree model description, used for board detection.
pub const DEVICE_TREE_MODEL_PATH: &str = "/proc/device-tree/model";

/// Raw brightness ceiling of the Tinker Board MCU register.
pub const TINKER_MCU_MAX_BRIGHTNESS: u32 = 255;
