//! Interfaces dos drivers do firmware
//!
//! O comportamento real de motores, luz e som pertence ao firmware do brick.
//! Estes traits descrevem apenas o que os helpers de extensão consomem.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::DeviceResult;

// ═══════════════════════════════════════════════════════════════════════════════
// TEMPO
// ═══════════════════════════════════════════════════════════════════════════════

/// Fonte de tempo para polling e cronômetros
pub trait Clock: Send + Sync {
    /// Milissegundos desde uma origem arbitrária e monotônica
    fn now_ms(&self) -> u64;

    /// Bloqueia a thread atual
    fn sleep(&self, duration: Duration);
}

/// Relógio do sistema (`Instant` + `thread::sleep`)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MOTOR
// ═══════════════════════════════════════════════════════════════════════════════

/// Comportamento do motor ao parar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Stop {
    /// Solta o motor
    #[default]
    Coast,
    /// Freia passivamente
    Brake,
    /// Mantém a posição ativamente
    Hold,
}

/// Driver de motor fornecido pelo firmware.
///
/// Velocidades em °/s, ângulos em graus, sempre no eixo do motor.
pub trait MotorDriver: Send {
    /// Ângulo acumulado do motor
    fn angle(&self) -> DeviceResult<f64>;

    /// Velocidade atual (°/s)
    fn speed(&self) -> DeviceResult<f64>;

    /// Gira continuamente
    fn run(&mut self, speed: f64) -> DeviceResult<()>;

    /// Gira por um tempo (ms)
    fn run_time(&mut self, speed: f64, time_ms: u64, stop: Stop, wait: bool) -> DeviceResult<()>;

    /// Gira um ângulo relativo
    fn run_angle(&mut self, speed: f64, rotation_angle: f64, stop: Stop, wait: bool)
        -> DeviceResult<()>;

    /// Gira até um ângulo absoluto
    fn run_target(&mut self, speed: f64, target_angle: f64, stop: Stop, wait: bool)
        -> DeviceResult<()>;

    /// Gira até travar; retorna o ângulo no travamento
    fn run_until_stalled(&mut self, speed: f64, stop: Stop, duty_limit: u8) -> DeviceResult<f64>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// LUZ E SOM
// ═══════════════════════════════════════════════════════════════════════════════

/// Luz de status do brick
pub trait Light: Send {
    /// Acende numa cor, ou apaga com `None`
    fn set(&mut self, color: Option<Color>) -> DeviceResult<()>;
}

/// Alto-falante do brick
pub trait Speaker: Send {
    /// Toca um bipe (bloqueante)
    fn beep(&mut self, frequency: u32, duration_ms: u64, volume: u8) -> DeviceResult<()>;

    /// Toca `count` bipes padrão
    fn beeps(&mut self, count: u32) -> DeviceResult<()> {
        for _ in 0..count {
            self.beep(500, 100, 30)?;
        }
        Ok(())
    }
}
