//! Erros de conversão de velocidade

use thiserror::Error;

pub type SpeedResult<T> = Result<T, SpeedError>;

/// Erros de perfil e preset de velocidade
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpeedError {
    /// RPM não positivo ou não finito
    #[error("Invalid RPM: {0}")]
    InvalidRpm(f64),

    /// Diâmetro de roda não positivo ou não finito
    #[error("Invalid wheel diameter: {0}")]
    InvalidWheelDiameter(f64),

    /// Preset de motor desconhecido
    #[error("Unknown motor preset: {0}")]
    UnknownPreset(String),
}
