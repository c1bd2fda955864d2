//! Robot profile (brick.toml) parser
//!
//! ```toml
//! [drive]
//! motor = "large"          # "medium", "large" or an RPM value
//! wheel_diameter = 56.0
//! min_percent = -100.0
//! max_percent = 100.0
//!
//! [gears]
//! train = "12:36/20:16:40"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use brick_gears::GearTrain;
use brick_speed::constants::{DEFAULT_MAX_PERCENT, DEFAULT_MIN_PERCENT, EV3_WHEEL_DIAMETER_MM};
use brick_speed::{DriveProfile, MotorPreset, PercentRange};

/// Profile file looked up in the working directory
pub const DEFAULT_PROFILE: &str = "brick.toml";

/// Robot profile (brick.toml)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Drive motor and wheel
    #[serde(default)]
    pub drive: DriveSection,

    /// Gear train attached to the motor
    #[serde(default)]
    pub gears: GearsSection,
}

/// `[drive]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveSection {
    #[serde(default = "default_motor")]
    pub motor: String,

    #[serde(default = "default_wheel_diameter")]
    pub wheel_diameter: f64,

    #[serde(default)]
    pub min_percent: Option<f64>,

    #[serde(default)]
    pub max_percent: Option<f64>,
}

impl Default for DriveSection {
    fn default() -> Self {
        Self {
            motor: default_motor(),
            wheel_diameter: default_wheel_diameter(),
            min_percent: None,
            max_percent: None,
        }
    }
}

/// `[gears]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GearsSection {
    /// Train in `12:36/20:16:40` notation
    #[serde(default)]
    pub train: Option<String>,
}

fn default_motor() -> String {
    "large".to_string()
}

fn default_wheel_diameter() -> f64 {
    EV3_WHEEL_DIAMETER_MM
}

impl Profile {
    /// Parse profile from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse brick.toml")
    }

    /// Load profile from file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content)
    }

    /// Load an explicit profile, or `brick.toml` from `dir` when present.
    ///
    /// Without either, the defaults are used and no path is returned.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
        }
        let candidate = dir.join(DEFAULT_PROFILE);
        if candidate.is_file() {
            let profile = Self::from_file(&candidate)?;
            return Ok((profile, Some(candidate)));
        }
        Ok((Self::default(), None))
    }

    pub fn motor(&self) -> Result<MotorPreset> {
        self.drive
            .motor
            .parse()
            .with_context(|| format!("Invalid [drive] motor '{}'", self.drive.motor))
    }

    pub fn range(&self) -> PercentRange {
        PercentRange::new(
            self.drive.min_percent.unwrap_or(DEFAULT_MIN_PERCENT),
            self.drive.max_percent.unwrap_or(DEFAULT_MAX_PERCENT),
        )
    }

    /// Validated drive profile from `[drive]`
    pub fn drive_profile(&self) -> Result<DriveProfile> {
        let profile = DriveProfile::from_preset(self.motor()?, self.drive.wheel_diameter)
            .context("Invalid [drive] section")?;
        Ok(profile.with_range(self.range()))
    }

    /// Gear train from `[gears]`, if configured
    pub fn gear_train(&self) -> Result<Option<GearTrain>> {
        self.gears
            .train
            .as_deref()
            .map(|notation| {
                GearTrain::parse(notation)
                    .with_context(|| format!("Invalid [gears] train '{}'", notation))
            })
            .transpose()
    }
}
