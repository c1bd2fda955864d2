//! # 🤖 brick-devices — Helpers de Extensão para Dispositivos
//!
//! Espera por sensores, cores, motores com engrenagens e efeitos de luz,
//! construídos sobre os drivers do firmware através de traits.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                     Extensões                          │
//! │  GearedMotor   Poller/StopWatch   EffectHandle         │
//! │  ColorMatch    Reflection         bearing/rotations    │
//! └───────────────┬───────────────────────────┬────────────┘
//!                 ↓                           ↓
//! ┌───────────────────────────┐   ┌────────────────────────┐
//! │ brick-speed / brick-gears │   │  Traits do firmware    │
//! │ percentuais, relações     │   │  MotorDriver  Light    │
//! └───────────────────────────┘   │  Speaker      Clock    │
//!                                 └────────────────────────┘
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use brick_devices::{bearing, Color, ColorMatch, Comparison, Reflection};
//!
//! let op: Comparison = ">=".parse().unwrap();
//! assert!(op.evaluate(&90.0, &45.0));
//!
//! let wanted = ColorMatch::from(vec![Color::Red, Color::Yellow]);
//! assert!(wanted.matches(Some(Color::Red)));
//! assert!(!wanted.matches(None));
//!
//! assert_eq!(bearing(-90.0), 270.0);
//! assert_eq!(Reflection::new(100.0, 0.0, 0.0).hex(), "ff0000");
//! ```
//!
//! ## Configuração
//!
//! Intervalos de polling e tempos dos efeitos vêm de `.env` ou do ambiente
//! (ver [`config`]).

pub mod color;
pub mod compare;
pub mod config;
pub mod effects;
pub mod error;
pub mod motor;
pub mod sensors;
pub mod traits;
pub mod wait;

pub use color::{color_matches, Color, ColorMatch, Reflection};
pub use compare::Comparison;
pub use effects::{beep_async, beeps_async, Effect, EffectHandle, SharedLight};
pub use error::{DeviceError, DeviceResult};
pub use motor::GearedMotor;
pub use sensors::{bearing, is_pressed, rotations, BeaconReading};
pub use traits::{Clock, Light, MotorDriver, Speaker, Stop, SystemClock};
pub use wait::{Poller, StopWatch};

#[cfg(test)]
mod tests;
