//! Operadores de comparação dos helpers de espera

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DeviceError;

/// Tipo de comparação `leitura <OP> alvo`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    Greater,
    Less,
    GreaterOrEqual,
    LessOrEqual,
    Equal,
    NotEqual,
}

impl Comparison {
    /// Avalia `a <OP> b`
    pub fn evaluate<T: PartialOrd + ?Sized>(&self, a: &T, b: &T) -> bool {
        match self {
            Comparison::Greater => a > b,
            Comparison::Less => a < b,
            Comparison::GreaterOrEqual => a >= b,
            Comparison::LessOrEqual => a <= b,
            Comparison::Equal => a == b,
            Comparison::NotEqual => a != b,
        }
    }

    /// Símbolo do operador
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::Greater => ">",
            Comparison::Less => "<",
            Comparison::GreaterOrEqual => ">=",
            Comparison::LessOrEqual => "<=",
            Comparison::Equal => "==",
            Comparison::NotEqual => "!=",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Comparison {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            ">" => Ok(Comparison::Greater),
            "<" => Ok(Comparison::Less),
            ">=" => Ok(Comparison::GreaterOrEqual),
            "<=" => Ok(Comparison::LessOrEqual),
            "==" => Ok(Comparison::Equal),
            "!=" => Ok(Comparison::NotEqual),
            other => Err(DeviceError::UnknownOperator(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_numbers() {
        assert!(Comparison::Greater.evaluate(&5.0, &3.0));
        assert!(!Comparison::Greater.evaluate(&3.0, &3.0));
        assert!(Comparison::GreaterOrEqual.evaluate(&3.0, &3.0));
        assert!(Comparison::Less.evaluate(&-1, &0));
        assert!(Comparison::LessOrEqual.evaluate(&0, &0));
        assert!(Comparison::Equal.evaluate(&7, &7));
        assert!(Comparison::NotEqual.evaluate(&7, &8));
    }

    #[test]
    fn test_nan_never_compares() {
        assert!(!Comparison::Equal.evaluate(&f64::NAN, &f64::NAN));
        assert!(Comparison::NotEqual.evaluate(&f64::NAN, &1.0));
    }

    #[test]
    fn test_parse_round_trip() {
        for op in [">", "<", ">=", "<=", "==", "!="] {
            let cmp: Comparison = op.parse().unwrap();
            assert_eq!(cmp.symbol(), op);
            assert_eq!(cmp.to_string(), op);
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "=>".parse::<Comparison>(),
            Err(DeviceError::UnknownOperator("=>".into()))
        );
    }
}
