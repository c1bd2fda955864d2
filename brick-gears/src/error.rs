//! Erros de trens de engrenagens

use thiserror::Error;

pub type GearResult<T> = Result<T, GearError>;

/// Erros de validação de engrenagens
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GearError {
    /// Número de dentes não positivo ou não finito
    #[error("Invalid tooth count {value} at gear {index}")]
    InvalidTeeth { index: usize, value: f64 },

    /// Trem mistura engrenagens simples e sub-trens
    #[error("Mixed gear train: element {0} does not match the first element")]
    MixedTrain(usize),

    /// Entrada não numérica dentro de um trem
    #[error("Non-numeric gear at position {0}")]
    NotNumeric(String),

    /// Notação de trem inválida
    #[error("Parse error: {0}")]
    Parse(String),
}
