//! Normalização de percentuais
//!
//! Converte um percentual inteiro (`100`, `50`) num multiplicador
//! fracionário (`1.0`, `0.5`), sempre dentro dos limites configurados.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_PERCENT, DEFAULT_MIN_PERCENT};

/// Converte percentual inteiro em multiplicador fracionário.
///
/// Regras, em ordem:
///
/// 1. Limites invertidos (`min > max`) são trocados.
/// 2. Limites iguais retornam o próprio limite (faixa degenerada).
/// 3. `percent` ausente ou `NaN` retorna `0` se `0` estiver na faixa,
///    senão o ponto médio `(min + max) / 2`.
/// 4. Caso contrário, `percent` é limitado à faixa e dividido por 100.
///
/// Nunca falha.
///
/// ```rust
/// use brick_speed::normalize;
///
/// assert_eq!(normalize(Some(150.0), -100.0, 100.0), 1.0);
/// assert_eq!(normalize(Some(-25.0), 100.0, -100.0), -0.25);
/// assert_eq!(normalize(None, 10.0, 100.0), 55.0);
/// ```
pub fn normalize(percent: Option<f64>, min_percent: f64, max_percent: f64) -> f64 {
    let (min, max) = if min_percent > max_percent {
        (max_percent, min_percent)
    } else {
        (min_percent, max_percent)
    };

    if min == max {
        return min;
    }

    let percent = match percent {
        Some(p) if !p.is_nan() => p,
        _ => {
            return if min <= 0.0 && max >= 0.0 {
                0.0
            } else {
                (min + max) / 2.0
            };
        }
    };

    let clamped = if percent > max {
        max
    } else if percent < min {
        min
    } else {
        percent
    };

    clamped / 100.0
}

/// Faixa de percentuais aceitos
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentRange {
    /// Percentual mínimo
    pub min: f64,
    /// Percentual máximo
    pub max: f64,
}

impl PercentRange {
    /// Cria faixa, ordenando os limites
    pub fn new(a: f64, b: f64) -> Self {
        if a > b {
            Self { min: b, max: a }
        } else {
            Self { min: a, max: b }
        }
    }

    /// Faixa somente positiva (`0..100`)
    pub fn forward_only() -> Self {
        Self { min: 0.0, max: DEFAULT_MAX_PERCENT }
    }

    /// Normaliza percentual nesta faixa
    pub fn normalize(&self, percent: Option<f64>) -> f64 {
        normalize(percent, self.min, self.max)
    }

    /// Faixa degenerada (um único ponto)?
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Verifica se o percentual está dentro da faixa
    pub fn contains(&self, percent: f64) -> bool {
        let range = Self::new(self.min, self.max);
        percent >= range.min && percent <= range.max
    }
}

impl Default for PercentRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_PERCENT,
            max: DEFAULT_MAX_PERCENT,
        }
    }
}
