//! Conversão de velocidades
//!
//! Percentual → °/s (motor) e percentual → distância/s (roda), além da
//! conversão entre velocidade linear e angular para um mesmo diâmetro.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEGREES_PER_ROTATION, EV3_WHEEL_DIAMETER_MM, LARGE_MOTOR_RPM, MEDIUM_MOTOR_RPM,
};
use crate::error::{SpeedError, SpeedResult};
use crate::percent::{normalize, PercentRange};

/// Velocidade linear máxima: `(rpm / 60) * (diâmetro * π)`
pub fn max_linear_speed(rpm: f64, wheel_diameter: f64) -> f64 {
    (rpm / 60.0) * (wheel_diameter * PI)
}

/// Velocidade angular máxima em °/s: `(rpm / 60) * 360`
pub fn max_angular_speed(rpm: f64) -> f64 {
    (rpm / 60.0) * DEGREES_PER_ROTATION
}

/// Percentual → velocidade linear (unidade do diâmetro por segundo)
///
/// Presets usuais: motor grande 160 RPM, roda de 56 mm.
pub fn speed_linear(
    percent: Option<f64>,
    rpm: f64,
    wheel_diameter: f64,
    min_percent: f64,
    max_percent: f64,
) -> f64 {
    let multiplier = normalize(percent, min_percent, max_percent);
    max_linear_speed(rpm, wheel_diameter) * multiplier
}

/// Percentual → velocidade angular (°/s)
///
/// Presets usuais: motor médio 240 RPM, motor grande 160 RPM.
pub fn speed_angular(percent: Option<f64>, rpm: f64, min_percent: f64, max_percent: f64) -> f64 {
    let multiplier = normalize(percent, min_percent, max_percent);
    max_angular_speed(rpm) * multiplier
}

/// Velocidade linear → angular (°/s) para o diâmetro dado
pub fn linear_to_angular(speed: f64, wheel_diameter: f64) -> f64 {
    let rotations = speed / (wheel_diameter * PI);
    rotations * DEGREES_PER_ROTATION
}

/// Velocidade angular (°/s) → linear para o diâmetro dado
pub fn angular_to_linear(speed: f64, wheel_diameter: f64) -> f64 {
    let rotations = speed / DEGREES_PER_ROTATION;
    rotations * (wheel_diameter * PI)
}

/// Preset de motor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotorPreset {
    /// Motor médio (240 RPM)
    Medium,
    /// Motor grande (160 RPM)
    Large,
    /// RPM arbitrário
    Custom(f64),
}

impl MotorPreset {
    /// RPM nominal do preset
    pub fn rpm(&self) -> f64 {
        match self {
            MotorPreset::Medium => MEDIUM_MOTOR_RPM,
            MotorPreset::Large => LARGE_MOTOR_RPM,
            MotorPreset::Custom(rpm) => *rpm,
        }
    }
}

impl Default for MotorPreset {
    fn default() -> Self {
        MotorPreset::Large
    }
}

impl fmt::Display for MotorPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorPreset::Medium => write!(f, "medium ({} RPM)", MEDIUM_MOTOR_RPM),
            MotorPreset::Large => write!(f, "large ({} RPM)", LARGE_MOTOR_RPM),
            MotorPreset::Custom(rpm) => write!(f, "custom ({} RPM)", rpm),
        }
    }
}

impl FromStr for MotorPreset {
    type Err = SpeedError;

    fn from_str(s: &str) -> SpeedResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "medium" => Ok(MotorPreset::Medium),
            "large" => Ok(MotorPreset::Large),
            other => {
                let rpm: f64 = other
                    .parse()
                    .map_err(|_| SpeedError::UnknownPreset(s.to_string()))?;
                if !rpm.is_finite() || rpm <= 0.0 {
                    return Err(SpeedError::InvalidRpm(rpm));
                }
                Ok(MotorPreset::Custom(rpm))
            }
        }
    }
}

/// Perfil de tração validado: motor + roda + faixa de percentuais
///
/// A desserialização passa por [`DriveProfile::new`], então perfis lidos de
/// arquivos obedecem às mesmas regras.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDriveProfile")]
pub struct DriveProfile {
    rpm: f64,
    wheel_diameter: f64,
    range: PercentRange,
}

impl DriveProfile {
    /// Cria perfil validado
    pub fn new(rpm: f64, wheel_diameter: f64) -> SpeedResult<Self> {
        if !rpm.is_finite() || rpm <= 0.0 {
            return Err(SpeedError::InvalidRpm(rpm));
        }
        if !wheel_diameter.is_finite() || wheel_diameter <= 0.0 {
            return Err(SpeedError::InvalidWheelDiameter(wheel_diameter));
        }
        Ok(Self {
            rpm,
            wheel_diameter,
            range: PercentRange::default(),
        })
    }

    /// Cria perfil a partir de um preset de motor
    pub fn from_preset(preset: MotorPreset, wheel_diameter: f64) -> SpeedResult<Self> {
        Self::new(preset.rpm(), wheel_diameter)
    }

    /// Define faixa de percentuais
    pub fn with_range(mut self, range: PercentRange) -> Self {
        self.range = range;
        self
    }

    pub fn rpm(&self) -> f64 {
        self.rpm
    }

    pub fn wheel_diameter(&self) -> f64 {
        self.wheel_diameter
    }

    pub fn range(&self) -> PercentRange {
        self.range
    }

    /// Percentual → velocidade linear
    pub fn linear(&self, percent: Option<f64>) -> f64 {
        speed_linear(percent, self.rpm, self.wheel_diameter, self.range.min, self.range.max)
    }

    /// Percentual → velocidade angular (°/s)
    pub fn angular(&self, percent: Option<f64>) -> f64 {
        speed_angular(percent, self.rpm, self.range.min, self.range.max)
    }

    /// Velocidade linear → angular com a roda do perfil
    pub fn to_angular(&self, speed: f64) -> f64 {
        linear_to_angular(speed, self.wheel_diameter)
    }

    /// Velocidade angular → linear com a roda do perfil
    pub fn to_linear(&self, speed: f64) -> f64 {
        angular_to_linear(speed, self.wheel_diameter)
    }
}

/// Forma serializada de [`DriveProfile`], antes da validação
#[derive(Deserialize)]
struct RawDriveProfile {
    rpm: f64,
    wheel_diameter: f64,
    #[serde(default)]
    range: PercentRange,
}

impl TryFrom<RawDriveProfile> for DriveProfile {
    type Error = SpeedError;

    fn try_from(raw: RawDriveProfile) -> SpeedResult<Self> {
        let range = PercentRange::new(raw.range.min, raw.range.max);
        Ok(Self::new(raw.rpm, raw.wheel_diameter)?.with_range(range))
    }
}

impl Default for DriveProfile {
    fn default() -> Self {
        Self {
            rpm: LARGE_MOTOR_RPM,
            wheel_diameter: EV3_WHEEL_DIAMETER_MM,
            range: PercentRange::default(),
        }
    }
}
