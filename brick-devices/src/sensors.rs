//! Matemática de sensores e esperas de botões

use serde::{Deserialize, Serialize};

use brick_speed::constants::DEGREES_PER_ROTATION;

use crate::error::DeviceResult;
use crate::traits::Clock;
use crate::wait::Poller;

// ═══════════════════════════════════════════════════════════════════════════════
// GYRO
// ═══════════════════════════════════════════════════════════════════════════════

/// Rumo em [0, 360) para um ângulo acumulado qualquer
///
/// `rem_euclid` arredonda negativos minúsculos para 360 exato; isso vira 0.
pub fn bearing(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(DEGREES_PER_ROTATION);
    if wrapped == DEGREES_PER_ROTATION {
        0.0
    } else {
        wrapped
    }
}

/// Graus para rotações
pub fn rotations(degrees: f64) -> f64 {
    degrees / DEGREES_PER_ROTATION
}

// ═══════════════════════════════════════════════════════════════════════════════
// INFRARED
// ═══════════════════════════════════════════════════════════════════════════════

/// Leitura do beacon remoto; `None` quando não há sinal no canal
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BeaconReading {
    pub distance: Option<f64>,
    pub angle: Option<f64>,
}

impl BeaconReading {
    pub fn new(distance: Option<f64>, angle: Option<f64>) -> Self {
        Self { distance, angle }
    }

    pub fn distance(&self) -> Option<f64> {
        self.distance
    }

    pub fn angle(&self) -> Option<f64> {
        self.angle
    }

    pub fn has_signal(&self) -> bool {
        self.distance.is_some()
    }
}

impl From<(Option<f64>, Option<f64>)> for BeaconReading {
    fn from((distance, angle): (Option<f64>, Option<f64>)) -> Self {
        Self { distance, angle }
    }
}

/// `true` se `button` está entre os pressionados
pub fn is_pressed<B: PartialEq>(pressed: &[B], button: &B) -> bool {
    pressed.contains(button)
}

impl<C: Clock> Poller<C> {
    /// Espera o sensor de toque ser pressionado
    pub fn wait_until_pressed<F>(&self, pressed: F) -> DeviceResult<()>
    where
        F: FnMut() -> DeviceResult<bool>,
    {
        self.wait_until(pressed)
    }

    /// Espera o sensor de toque ser solto
    pub fn wait_until_released<F>(&self, pressed: F) -> DeviceResult<()>
    where
        F: FnMut() -> DeviceResult<bool>,
    {
        self.wait_while(pressed)
    }

    /// Espera `button` aparecer entre os botões pressionados do controle
    pub fn wait_until_button_pressed<B, F>(&self, mut buttons: F, button: &B) -> DeviceResult<()>
    where
        B: PartialEq,
        F: FnMut() -> DeviceResult<Vec<B>>,
    {
        self.wait_until(|| Ok(is_pressed(&buttons()?, button)))
    }

    /// Espera `button` sair dos botões pressionados do controle
    pub fn wait_until_button_released<B, F>(&self, mut buttons: F, button: &B) -> DeviceResult<()>
    where
        B: PartialEq,
        F: FnMut() -> DeviceResult<Vec<B>>,
    {
        self.wait_while(|| Ok(is_pressed(&buttons()?, button)))
    }

    /// Toque de um botão do controle (ver [`Poller::wait_until_bumped`])
    pub fn wait_until_button_bumped<B, F>(
        &self,
        mut buttons: F,
        button: &B,
        window_ms: u64,
    ) -> DeviceResult<()>
    where
        B: PartialEq,
        F: FnMut() -> DeviceResult<Vec<B>>,
    {
        self.wait_until_bumped(|| Ok(is_pressed(&buttons()?, button)), window_ms)
    }
}
