use std::fs;
use std::path::Path;
use std::time::Duration;

use touchlight::{
    Backlight, BacklightBuilder, BacklightConfig, BacklightError, BoardType, FakeBacklightSysfs,
};

fn read_attr(sysfs: &FakeBacklightSysfs, name: &str) -> String {
    fs::read_to_string(sysfs.path().join(name))
        .unwrap()
        .trim_end()
        .to_string()
}

fn pi_backlight(sysfs: &FakeBacklightSysfs) -> Backlight {
    BacklightBuilder::new()
        .with_sysfs_path(sysfs.path())
        .with_board_type(BoardType::RaspberryPi)
        .with_config(BacklightConfig::default())
        .build()
        .unwrap()
}

fn tinker_backlight(sysfs: &FakeBacklightSysfs, config: BacklightConfig) -> Backlight {
    fs::write(sysfs.path().join("tinker_mcu_bl"), "255").unwrap();
    BacklightBuilder::new()
        .with_sysfs_path(sysfs.path())
        .with_board_type(BoardType::TinkerBoard)
        .with_config(config)
        .build()
        .unwrap()
}

#[test]
fn emulator_sentinel_without_emulator_fails() {
    let result = BacklightBuilder::new()
        .with_sysfs_path(Path::new(":emulator:"))
        .with_config(BacklightConfig::default())
        .build();
    assert!(matches!(result, Err(BacklightError::EmulatorNotRunning(_))));
}

#[test]
fn fresh_fixture_reads_full_brightness() {
    let sysfs = FakeBacklightSysfs::new().unwrap();
    let backlight = pi_backlight(&sysfs);
    assert_eq!(backlight.brightness().unwrap(), 100);
}

#[test]
fn set_brightness_writes_denormalized_raw_value() {
    let sysfs = FakeBacklightSysfs::new().unwrap();
    let mut backlight = pi_backlight(&sysfs);

    backlight.set_brightness(50).unwrap();
    assert_eq!(read_attr(&sysfs, "brightness"), "128");
    assert_eq!(backlight.brightness().unwrap(), 50);

    backlight.set_brightness(0).unwrap();
    assert_eq!(read_attr(&sysfs, "brightness"), "0");
    assert_eq!(backlight.brightness().unwrap(), 0);

    backlight.set_brightness(100).unwrap();
    assert_eq!(read_attr(&sysfs, "brightness"), "255");
    assert_eq!(backlight.brightness().unwrap(), 100);
}

#[test]
fn set_brightness_rejects_out_of_range_values() {
    let sysfs = FakeBacklightSysfs::new().unwrap();
    let mut backlight = pi_backlight(&sysfs);
    assert!(matches!(
        backlight.set_brightness(101),
        Err(BacklightError::BrightnessOutOfRange(101))
    ));
    // The raw file is untouched.
    assert_eq!(read_attr(&sysfs, "brightness"), "255");
}

#[test]
fn power_polarity_is_inverted_on_the_switch_attribute() {
    let sysfs = FakeBacklightSysfs::new().unwrap();
    let mut backlight = pi_backlight(&sysfs);

    // The fixture starts with bl_power = 0, which means on.
    assert!(backlight.power().unwrap());

    backlight.set_power(false).unwrap();
    assert_eq!(read_attr(&sysfs, "bl_power"), "1");
    assert!(!backlight.power().unwrap());

    backlight.set_power(true).unwrap();
    assert_eq!(read_attr(&sysfs, "bl_power"), "0");
    assert!(backlight.power().unwrap());
}

#[test]
fn tinker_power_is_emulated_through_brightness() {
    let sysfs = FakeBacklightSysfs::new().unwrap();
    let mut backlight = tinker_backlight(&sysfs, BacklightConfig::default());

    assert!(backlight.power().unwrap());
    assert_eq!(backlight.brightness().unwrap(), 100);

    backlight.set_power(false).unwrap();
    assert_eq!(read_attr(&sysfs, "tinker_mcu_bl"), "0");
    assert!(!backlight.power().unwrap());

    // Turning back on goes straight to the ceiling, the previous level is
    // not remembered.
    backlight.set_power(true).unwrap();
    assert_eq!(read_attr(&sysfs, "tinker_mcu_bl"), "255");
    assert!(backlight.power().unwrap());
}

#[test]
fn tinker_set_brightness_uses_the_mcu_register() {
    let sysfs = FakeBacklightSysfs::new().unwrap();
    let mut backlight = tinker_backlight(&sysfs, BacklightConfig::default());

    backlight.set_brightness(50).unwrap();
    assert_eq!(read_attr(&sysfs, "tinker_mcu_bl"), "128");
    assert_eq!(backlight.brightness().unwrap(), 50);
}

#[test]
fn tinker_power_can_ride_the_fade_loop() {
    let sysfs = FakeBacklightSysfs::new().unwrap();
    let config = BacklightConfig {
        fade_power: true,
        fade_duration: 0.05,
        ..Default::default()
    };
    let mut backlight = tinker_backlight(&sysfs, config);

    backlight.set_power(false).unwrap();
    assert_eq!(read_attr(&sysfs, "tinker_mcu_bl"), "0");

    backlight.set_power(true).unwrap();
    assert_eq!(read_attr(&sysfs, "tinker_mcu_bl"), "255");
}

#[test]
fn fade_scope_restores_previous_duration() {
    let sysfs = FakeBacklightSysfs::new().unwrap();
    let mut backlight = pi_backlight(&sysfs);
    backlight.set_fade_duration(Duration::from_millis(100));

    {
        let mut backlight = backlight.fade(Duration::from_millis(500));
        assert_eq!(backlight.fade_duration(), Duration::from_millis(500));
        backlight.set_brightness(100).unwrap();
    }
    assert_eq!(backlight.fade_duration(), Duration::from_millis(100));
}

#[test]
fn fade_scope_restores_duration_when_the_operation_fails() {
    let sysfs = FakeBacklightSysfs::new().unwrap();
    let mut backlight = pi_backlight(&sysfs);
    backlight.set_fade_duration(Duration::from_millis(100));

    {
        let mut backlight = backlight.fade(Duration::from_millis(500));
        backlight.set_brightness(101).unwrap_err();
    }
    assert_eq!(backlight.fade_duration(), Duration::from_millis(100));
}

#[test]
fn fade_lands_exactly_on_the_target() {
    let sysfs = FakeBacklightSysfs::new().unwrap();
    let mut backlight = pi_backlight(&sysfs);

    backlight.set_brightness(0).unwrap();
    backlight.set_fade_duration(Duration::from_millis(100));
    backlight.set_brightness(100).unwrap();

    assert_eq!(read_attr(&sysfs, "brightness"), "255");
    assert_eq!(backlight.brightness().unwrap(), 100);
}

#[test]
fn fade_to_the_current_value_degenerates_to_one_write() {
    let sysfs = FakeBacklightSysfs::new().unwrap();
    let mut backlight = pi_backlight(&sysfs);

    backlight.set_brightness(50).unwrap();
    backlight.set_fade_duration(Duration::from_secs(10));

    // Same target; must return immediately instead of dividing by a zero
    // diff or sleeping.
    backlight.set_brightness(50).unwrap();
    assert_eq!(read_attr(&sysfs, "brightness"), "128");
}

#[test]
fn unparsable_attribute_fails_after_bounded_retries() {
    let sysfs = FakeBacklightSysfs::new().unwrap();
    let backlight = pi_backlight(&sysfs);

    fs::write(sysfs.path().join("brightness"), "garbage").unwrap();
    match backlight.brightness() {
        Err(BacklightError::UnreadableAttribute { tries, .. }) => assert_eq!(tries, 4),
        other => panic!("expected UnreadableAttribute, got {other:?}"),
    }
}

#[test]
fn config_board_type_is_used_when_builder_has_none() {
    let sysfs = FakeBacklightSysfs::new().unwrap();
    fs::write(sysfs.path().join("tinker_mcu_bl"), "255").unwrap();
    let config = BacklightConfig {
        board_type: Some(BoardType::TinkerBoard2),
        ..Default::default()
    };
    let backlight = BacklightBuilder::new()
        .with_sysfs_path(sysfs.path())
        .with_config(config)
        .build()
        .unwrap();
    assert_eq!(backlight.board_type(), BoardType::TinkerBoard2);
}
