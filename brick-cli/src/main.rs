//! brick - speed and gear calculations for brick robots
//! Command-line front end for brick-speed and brick-gears

mod profile;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use serde_json::json;

use brick_devices::config;
use brick_gears::{gear_ratio, GearTrain};
use brick_speed::constants::{EV3_WHEEL_DIAMETER_MM, LARGE_MOTOR_RPM, MEDIUM_MOTOR_RPM};
use brick_speed::{DriveProfile, MotorPreset, PercentRange};

use crate::profile::Profile;

#[derive(Parser)]
#[command(name = "brick")]
#[command(author = "Brick-Ext Contributors")]
#[command(version = "2026.10.16")]
#[command(about = "Speed conversion and gear ratios for brick robots", long_about = None)]
struct Cli {
    /// Robot profile (defaults to ./brick.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    profile: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a percentage into a motor or wheel speed
    Speed {
        #[command(subcommand)]
        kind: SpeedKind,
    },

    /// Convert between wheel (linear) and motor (angular) speed
    Convert {
        #[command(subcommand)]
        direction: ConvertDirection,
    },

    /// Compute the ratio of a gear train
    Ratio {
        /// Gear train, e.g. "12:36" or "12:36/20:16:40" (defaults to the profile's)
        #[arg(value_name = "TRAIN")]
        train: Option<String>,

        /// Number of meshes to include
        #[arg(short, long)]
        depth: Option<usize>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show presets and the active profile
    Info,
}

#[derive(Subcommand)]
enum SpeedKind {
    /// Percentage → linear speed (wheel units per second)
    Linear {
        #[command(flatten)]
        args: SpeedArgs,

        /// Wheel diameter
        #[arg(short, long)]
        wheel: Option<f64>,
    },

    /// Percentage → angular speed (deg/s)
    Angular {
        #[command(flatten)]
        args: SpeedArgs,
    },
}

#[derive(clap::Args)]
struct SpeedArgs {
    /// Requested percentage
    #[arg(value_name = "PERCENT", allow_hyphen_values = true)]
    percent: f64,

    /// Motor preset ("medium", "large") or RPM
    #[arg(short, long, value_name = "PRESET|RPM")]
    rpm: Option<MotorPreset>,

    /// Minimum accepted percentage
    #[arg(long, allow_hyphen_values = true)]
    min: Option<f64>,

    /// Maximum accepted percentage
    #[arg(long, allow_hyphen_values = true)]
    max: Option<f64>,
}

#[derive(Subcommand)]
enum ConvertDirection {
    /// Linear speed → deg/s
    ToAngular {
        #[arg(value_name = "SPEED", allow_hyphen_values = true)]
        speed: f64,

        /// Wheel diameter
        #[arg(short, long)]
        wheel: Option<f64>,
    },

    /// Deg/s → linear speed
    ToLinear {
        #[arg(value_name = "SPEED", allow_hyphen_values = true)]
        speed: f64,

        /// Wheel diameter
        #[arg(short, long)]
        wheel: Option<f64>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brick_cli=info,brick_devices=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let (profile, profile_path) = Profile::load(cli.profile.as_deref(), &cwd)?;
    if let Some(path) = &profile_path {
        tracing::debug!(path = %path.display(), "loaded profile");
    }

    match cli.command {
        Commands::Speed { kind } => speed_command(&profile, kind),
        Commands::Convert { direction } => convert_command(&profile, direction),
        Commands::Ratio { train, depth, json } => {
            ratio_command(&profile, train.as_deref(), depth, json)
        }
        Commands::Info => info_command(&profile, profile_path.as_deref()),
    }
}

// ============================================================================
// Speed commands
// ============================================================================

/// Profile drive settings with command-line overrides applied
fn drive_with_overrides(
    profile: &Profile,
    args: &SpeedArgs,
    wheel: Option<f64>,
) -> Result<DriveProfile> {
    let base = profile.drive_profile()?;
    let rpm = args.rpm.map(|p| p.rpm()).unwrap_or(base.rpm());
    let wheel = wheel.unwrap_or(base.wheel_diameter());
    let range = PercentRange::new(
        args.min.unwrap_or(base.range().min),
        args.max.unwrap_or(base.range().max),
    );
    Ok(DriveProfile::new(rpm, wheel)?.with_range(range))
}

fn speed_command(profile: &Profile, kind: SpeedKind) -> Result<()> {
    match kind {
        SpeedKind::Linear { args, wheel } => {
            let drive = drive_with_overrides(profile, &args, wheel)?;
            let speed = drive.linear(Some(args.percent));
            println!(
                "{} {} /s  ({}% at {} RPM, wheel {})",
                "linear:".green().bold(),
                format!("{:.2}", speed).cyan(),
                args.percent,
                drive.rpm(),
                drive.wheel_diameter()
            );
        }
        SpeedKind::Angular { args } => {
            let drive = drive_with_overrides(profile, &args, None)?;
            let speed = drive.angular(Some(args.percent));
            println!(
                "{} {} deg/s  ({}% at {} RPM)",
                "angular:".green().bold(),
                format!("{:.2}", speed).cyan(),
                args.percent,
                drive.rpm()
            );
        }
    }
    Ok(())
}

fn convert_command(profile: &Profile, direction: ConvertDirection) -> Result<()> {
    let base = profile.drive_profile()?;
    match direction {
        ConvertDirection::ToAngular { speed, wheel } => {
            let drive = DriveProfile::new(base.rpm(), wheel.unwrap_or(base.wheel_diameter()))?;
            println!(
                "{} {} deg/s",
                "angular:".green().bold(),
                format!("{:.2}", drive.to_angular(speed)).cyan()
            );
        }
        ConvertDirection::ToLinear { speed, wheel } => {
            let drive = DriveProfile::new(base.rpm(), wheel.unwrap_or(base.wheel_diameter()))?;
            println!(
                "{} {} /s",
                "linear:".green().bold(),
                format!("{:.2}", drive.to_linear(speed)).cyan()
            );
        }
    }
    Ok(())
}

// ============================================================================
// Gear commands
// ============================================================================

fn resolve_train(profile: &Profile, notation: Option<&str>) -> Result<GearTrain> {
    match notation {
        Some(notation) => GearTrain::parse(notation)
            .with_context(|| format!("Invalid gear train '{}'", notation)),
        None => profile
            .gear_train()?
            .context("No gear train given and none configured in [gears]"),
    }
}

fn ratio_command(
    profile: &Profile,
    notation: Option<&str>,
    depth: Option<usize>,
    as_json: bool,
) -> Result<()> {
    let train = resolve_train(profile, notation)?;
    let ratio = gear_ratio(&train, depth)?;

    if as_json {
        let out = json!({
            "train": train,
            "meshes": train.mesh_count(),
            "depth": depth,
            "ratio": ratio,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{} {}", "train:".bold(), train.to_string().cyan());
    println!("{} {}", "meshes:".bold(), train.mesh_count());
    if let Some(depth) = depth {
        println!("{} {}", "depth:".bold(), depth);
    }
    println!("{} {}", "ratio:".green().bold(), format!("{:.6}", ratio).cyan());
    println!("  {} 1 : {:.4}", "≙".dimmed(), 1.0 / ratio);
    Ok(())
}

// ============================================================================
// Info
// ============================================================================

fn info_command(profile: &Profile, path: Option<&Path>) -> Result<()> {
    println!("{}", "brick - speed and gear calculations".bold());
    println!();
    println!("{}", "Motor presets:".bold());
    println!("  medium   {} RPM", MEDIUM_MOTOR_RPM);
    println!("  large    {} RPM", LARGE_MOTOR_RPM);
    println!("  wheel    {} mm (default)", EV3_WHEEL_DIAMETER_MM);
    println!();

    println!("{}", "Profile:".bold());
    match path {
        Some(path) => println!("  file     {}", path.display().to_string().cyan()),
        None => println!("  file     {}", "(defaults)".dimmed()),
    }
    let drive = profile.drive_profile()?;
    println!("  motor    {}", profile.motor()?);
    println!("  wheel    {}", drive.wheel_diameter());
    println!("  range    {}..{} %", drive.range().min, drive.range().max);
    match profile.gear_train()? {
        Some(train) => println!(
            "  gears    {} (ratio {:.6})",
            train,
            gear_ratio(&train, None)?
        ),
        None => println!("  gears    {}", "(none)".dimmed()),
    }
    println!();

    println!("{}", "Timings (env):".bold());
    println!("  poll     {} ms", config::poll_interval_ms());
    println!("  bump     {} ms", config::bump_window_ms());
    println!(
        "  flash    {}/{} ms",
        config::flash_on_ms(),
        config::flash_off_ms()
    );
    println!(
        "  pulse    {}/{}/{} ms",
        config::pulse_on_ms(),
        config::pulse_short_ms(),
        config::pulse_long_ms()
    );
    println!();

    println!("{}", "Commands:".bold());
    println!("  brick speed linear 50 --rpm large --wheel 56");
    println!("  brick speed angular -30 --rpm medium");
    println!("  brick convert to-angular 200");
    println!("  brick ratio 12:36/20:16:40 --depth 2");
    Ok(())
}
