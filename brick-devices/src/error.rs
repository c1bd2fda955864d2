//! Erros da camada de dispositivos

use brick_gears::GearError;
use brick_speed::SpeedError;
use thiserror::Error;

pub type DeviceResult<T> = Result<T, DeviceError>;

/// Erros de dispositivo e dos helpers de extensão
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DeviceError {
    /// Driver do firmware reportou falha
    #[error("Driver error: {0}")]
    Driver(String),

    /// Condição não atingida no prazo
    #[error("Operation timeout after {0}ms")]
    Timeout(u64),

    /// Operador de comparação desconhecido
    #[error("Unknown comparison operator: {0}")]
    UnknownOperator(String),

    /// Número de cor desconhecido
    #[error("Unknown color: {0}")]
    UnknownColor(String),

    /// Efeito de luz terminou com pânico
    #[error("Light effect failed: {0}")]
    EffectFailed(String),

    /// Erro de engrenagens
    #[error(transparent)]
    Gear(#[from] GearError),

    /// Erro de velocidade
    #[error(transparent)]
    Speed(#[from] SpeedError),
}
