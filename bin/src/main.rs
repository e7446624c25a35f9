use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use touchlight::{Backlight, BacklightBuilder, BacklightError, BoardType};

use clap::{ArgGroup, CommandFactory, Parser};

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
enum CliBoardType {
    RaspberryPi,
    TinkerBoard,
    #[value(name = "tinker-board-2")]
    TinkerBoard2,
    MicrosoftSurfaceRt,
}

impl From<CliBoardType> for BoardType {
    fn from(board_type: CliBoardType) -> Self {
        match board_type {
            CliBoardType::RaspberryPi => BoardType::RaspberryPi,
            CliBoardType::TinkerBoard => BoardType::TinkerBoard,
            CliBoardType::TinkerBoard2 => BoardType::TinkerBoard2,
            CliBoardType::MicrosoftSurfaceRt => BoardType::MicrosoftSurfaceRt,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
enum PowerArg {
    On,
    Off,
    Toggle,
}

/// Get and set power and brightness of touchscreen display backlights.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(group(
            ArgGroup::new("action")
                .args(["get_brightness", "set_brightness", "get_power", "set_power"]),
        ))]
struct Args {
    /// Optional path to the backlight sysfs, set to :emulator: to use with
    /// a running emulator
    #[arg(value_name = "SYSFS_PATH")]
    sysfs_path: Option<PathBuf>,

    /// Get the display brightness (0-100)
    #[arg(long)]
    get_brightness: bool,

    /// Set the display brightness (0-100)
    #[arg(
        short = 'b',
        long,
        value_name = "VALUE",
        value_parser = clap::value_parser!(u8).range(..=100)
    )]
    set_brightness: Option<u8>,

    /// Get the display power (on/off)
    #[arg(long)]
    get_power: bool,

    /// Set the display power (on/off/toggle)
    #[arg(short = 'p', long, value_name = "VALUE", value_enum)]
    set_power: Option<PowerArg>,

    /// Fading duration in seconds
    #[arg(short = 'd', long, default_value_t = 0.0)]
    duration: f64,

    /// Board type, detected from the device tree when omitted
    #[arg(short = 'B', long, value_enum)]
    board_type: Option<CliBoardType>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let has_action = args.get_brightness
        || args.set_brightness.is_some()
        || args.get_power
        || args.set_power.is_some();
    if !has_action {
        Args::command()
            .print_help()
            .expect("failed to print help to stdout");
        return ExitCode::SUCCESS;
    }

    if args.duration != 0.0
        && args.set_brightness.is_none()
        && args.set_power != Some(PowerArg::Toggle)
    {
        Args::command()
            .error(
                clap::error::ErrorKind::ArgumentConflict,
                "-d/--duration must be used with -b/--set-brightness or -p/--set-power toggle",
            )
            .exit();
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), BacklightError> {
    let duration = Duration::try_from_secs_f64(args.duration)
        .map_err(|_| BacklightError::InvalidDuration(args.duration))?;

    let mut builder = BacklightBuilder::new();
    if let Some(sysfs_path) = args.sysfs_path.as_deref() {
        builder = builder.with_sysfs_path(sysfs_path);
    }
    if let Some(board_type) = args.board_type {
        builder = builder.with_board_type(board_type.into());
    }
    let mut backlight = builder.build()?;

    if args.get_brightness {
        println!("{}", backlight.brightness()?);
    } else if let Some(value) = args.set_brightness {
        backlight.fade(duration).set_brightness(value)?;
    } else if args.get_power {
        println!("{}", if backlight.power()? { "on" } else { "off" });
    } else if let Some(power) = args.set_power {
        set_power(&mut backlight, power, duration)?;
    }

    Ok(())
}

fn set_power(
    backlight: &mut Backlight,
    power: PowerArg,
    duration: Duration,
) -> Result<(), BacklightError> {
    match power {
        PowerArg::On => backlight.set_power(true),
        PowerArg::Off => backlight.set_power(false),
        PowerArg::Toggle => {
            let has_switch = backlight.board_type().has_power_switch();
            if backlight.power()? {
                backlight.fade(duration).set_brightness(0)?;
                if has_switch {
                    backlight.set_power(false)?;
                }
                Ok(())
            } else {
                // Start dark so the display does not flash before the fade.
                backlight.set_brightness(0)?;
                if has_switch {
                    backlight.set_power(true)?;
                }
                backlight.fade(duration).set_brightness(100)
            }
        }
    }
}
