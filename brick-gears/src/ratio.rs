//! Cálculo da relação de transmissão

use serde_json::Value;

use crate::error::GearResult;
use crate::train::GearTrain;

/// Relação composta dos primeiros `depth` engrenamentos.
///
/// - Trem vazio → `1`
/// - `depth` ausente ou maior que o número de engrenamentos → todos
/// - `depth == 0` → `1`
///
/// Dentes inválidos (zero, negativos, não finitos) retornam
/// [`GearError::InvalidTeeth`](crate::GearError::InvalidTeeth).
pub fn gear_ratio(train: &GearTrain, depth: Option<usize>) -> GearResult<f64> {
    train.validate()?;

    let meshes = train.mesh_count();
    let depth = match depth {
        Some(d) if d <= meshes => d,
        _ => meshes,
    };

    if depth == 0 {
        return Ok(1.0);
    }

    Ok(train.meshes().take(depth).map(|m| m.ratio()).product())
}

/// Relação a partir de valores dinâmicos (JSON).
///
/// Valores que não descrevem engrenagens retornam `1`; `depth` que não seja
/// inteiro não negativo é ignorado.
pub fn gear_ratio_value(gears: &Value, depth: Option<&Value>) -> GearResult<f64> {
    let depth = depth.and_then(Value::as_u64).map(|d| d as usize);
    match GearTrain::from_value(gears)? {
        Some(train) => gear_ratio(&train, depth),
        None => Ok(1.0),
    }
}

impl GearTrain {
    /// Relação até o estágio `depth`
    pub fn ratio(&self, depth: Option<usize>) -> GearResult<f64> {
        gear_ratio(self, depth)
    }

    /// Ângulo na engrenagem de saída para um ângulo do motor
    pub fn output_angle(&self, motor_angle: f64, depth: Option<usize>) -> GearResult<f64> {
        Ok(motor_angle * self.ratio(depth)?)
    }

    /// Velocidade na engrenagem de saída para uma velocidade do motor
    pub fn output_speed(&self, motor_speed: f64, depth: Option<usize>) -> GearResult<f64> {
        Ok(motor_speed * self.ratio(depth)?)
    }

    /// Velocidade do motor necessária para a velocidade de saída pedida
    pub fn input_speed(&self, output_speed: f64, depth: Option<usize>) -> GearResult<f64> {
        Ok(output_speed / self.ratio(depth)?)
    }

    /// Ângulo do motor necessário para o ângulo de saída pedido
    pub fn input_angle(&self, output_angle: f64, depth: Option<usize>) -> GearResult<f64> {
        Ok(output_angle / self.ratio(depth)?)
    }
}
