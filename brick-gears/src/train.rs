//! Trens de engrenagens
//!
//! O modo (trem simples ou trens encadeados) é decidido uma única vez, na
//! construção do [`GearTrain`], e nunca inferido durante o cálculo.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GearError, GearResult};

/// Especificação de engrenagens, da entrada (motor) para a saída
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GearTrain {
    /// Um único trem: `[12, 36]`
    Flat(Vec<f64>),
    /// Trens encadeados por eixos compartilhados: `[[12, 36], [20, 16, 40]]`
    Trains(Vec<Vec<f64>>),
}

/// Engrenamento entre duas engrenagens adjacentes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mesh {
    /// Dentes da engrenagem motora
    pub driver: f64,
    /// Dentes da engrenagem movida
    pub driven: f64,
}

impl Mesh {
    /// Fator deste engrenamento: `motora / movida`
    pub fn ratio(&self) -> f64 {
        self.driver / self.driven
    }
}

impl GearTrain {
    /// Trens como fatias, na ordem de transmissão
    pub fn trains(&self) -> Vec<&[f64]> {
        match self {
            GearTrain::Flat(gears) => vec![gears.as_slice()],
            GearTrain::Trains(trains) => trains.iter().map(Vec::as_slice).collect(),
        }
    }

    /// Todas as engrenagens, achatadas
    pub fn gears(&self) -> impl Iterator<Item = f64> + '_ {
        self.trains().into_iter().flat_map(|t| t.iter().copied())
    }

    /// Engrenamentos em ordem; a fronteira entre trens não gera engrenamento
    pub fn meshes(&self) -> impl Iterator<Item = Mesh> + '_ {
        self.trains().into_iter().flat_map(|t| {
            t.windows(2).map(|w| Mesh {
                driver: w[0],
                driven: w[1],
            })
        })
    }

    /// Número total de engrenamentos
    pub fn mesh_count(&self) -> usize {
        self.trains()
            .iter()
            .map(|t| t.len().saturating_sub(1))
            .sum()
    }

    /// Sem nenhuma engrenagem?
    pub fn is_empty(&self) -> bool {
        self.gears().next().is_none()
    }

    /// Valida número de dentes (finito e positivo)
    pub fn validate(&self) -> GearResult<()> {
        for (index, value) in self.gears().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(GearError::InvalidTeeth { index, value });
            }
        }
        Ok(())
    }

    /// Lê a notação textual: `:` ou `,` separa engrenagens, `/` separa trens.
    ///
    /// `"12:36"` → `Flat`, `"12:36/20:16:40"` → `Trains`. Uma `/` final marca
    /// `Trains` com um único trem: `"12:36/"`.
    pub fn parse(input: &str) -> GearResult<Self> {
        let input = input.trim();
        let (input, nested) = match input.strip_suffix('/') {
            Some(body) => (body.trim_end(), true),
            None => (input, false),
        };
        if input.is_empty() {
            return Err(GearError::Parse("empty gear train".into()));
        }

        let mut trains = Vec::new();
        for segment in input.split('/') {
            let mut gears = Vec::new();
            for token in segment.split([':', ',']) {
                let token = token.trim();
                let teeth: f64 = token
                    .parse()
                    .map_err(|_| GearError::Parse(format!("invalid tooth count '{}'", token)))?;
                gears.push(teeth);
            }
            trains.push(gears);
        }

        let train = if trains.len() == 1 && !nested {
            GearTrain::Flat(trains.remove(0))
        } else {
            GearTrain::Trains(trains)
        };
        train.validate()?;
        Ok(train)
    }

    /// Converte um valor dinâmico (JSON) decidindo o modo pelo primeiro elemento.
    ///
    /// Retorna `Ok(None)` quando o valor não descreve engrenagens: não é
    /// sequência, está vazio, ou o primeiro elemento não é número nem
    /// sequência. Elementos que não combinam com o primeiro são rejeitados.
    pub fn from_value(value: &Value) -> GearResult<Option<Self>> {
        let items = match value.as_array() {
            Some(items) if !items.is_empty() => items,
            _ => return Ok(None),
        };

        match &items[0] {
            Value::Number(_) => {
                let gears = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| match item {
                        Value::Number(n) => number(n, || i.to_string()),
                        Value::Array(_) => Err(GearError::MixedTrain(i)),
                        _ => Err(GearError::NotNumeric(i.to_string())),
                    })
                    .collect::<GearResult<Vec<_>>>()?;
                Ok(Some(GearTrain::Flat(gears)))
            }
            Value::Array(_) => {
                let mut trains = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let inner = item.as_array().ok_or(GearError::MixedTrain(i))?;
                    let gears = inner
                        .iter()
                        .enumerate()
                        .map(|(j, gear)| match gear {
                            Value::Number(n) => number(n, || format!("{}.{}", i, j)),
                            _ => Err(GearError::NotNumeric(format!("{}.{}", i, j))),
                        })
                        .collect::<GearResult<Vec<_>>>()?;
                    trains.push(gears);
                }
                Ok(Some(GearTrain::Trains(trains)))
            }
            _ => Ok(None),
        }
    }
}

fn number(n: &serde_json::Number, position: impl FnOnce() -> String) -> GearResult<f64> {
    n.as_f64().ok_or_else(|| GearError::NotNumeric(position()))
}

impl Default for GearTrain {
    fn default() -> Self {
        GearTrain::Flat(Vec::new())
    }
}

/// Escreve a notação de [`GearTrain::parse`]; `parse(&t.to_string())`
/// devolve o mesmo modo.
impl fmt::Display for GearTrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trains: Vec<String> = self
            .trains()
            .iter()
            .map(|t| {
                t.iter()
                    .map(|g| g.to_string())
                    .collect::<Vec<_>>()
                    .join(":")
            })
            .collect();
        write!(f, "{}", trains.join("/"))?;
        if matches!(self, GearTrain::Trains(t) if t.len() == 1) {
            f.write_str("/")?;
        }
        Ok(())
    }
}
