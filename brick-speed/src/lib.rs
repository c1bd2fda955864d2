//! # 🏎️ brick-speed — Percentuais e Velocidades Físicas
//!
//! Converte velocidades pedidas em percentual (`-100..100`) para unidades
//! físicas de motor e roda, no formato esperado pelos drivers do brick.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            Unit Speed Converter             │
//! │  speed_linear()        speed_angular()      │
//! │  linear_to_angular()   angular_to_linear()  │
//! │  DriveProfile          MotorPreset          │
//! └──────────────────────┬──────────────────────┘
//!                        ↓
//! ┌─────────────────────────────────────────────┐
//! │           Percentage Normalizer             │
//! │  normalize()           PercentRange         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use brick_speed::{normalize, speed_angular, speed_linear, constants};
//!
//! // 50% → 0.5
//! assert_eq!(normalize(Some(50.0), -100.0, 100.0), 0.5);
//!
//! // Motor médio a 100%: 240 RPM → 1440 °/s
//! let deg_s = speed_angular(Some(100.0), constants::MEDIUM_MOTOR_RPM, -100.0, 100.0);
//! assert_eq!(deg_s, 1440.0);
//!
//! // Motor grande a 50% com roda de 56 mm
//! let mm_s = speed_linear(
//!     Some(50.0),
//!     constants::LARGE_MOTOR_RPM,
//!     constants::EV3_WHEEL_DIAMETER_MM,
//!     -100.0,
//!     100.0,
//! );
//! assert!((mm_s - 234.57).abs() < 0.01);
//! ```
//!
//! ## Características
//!
//! - **Nunca falha**: entrada inválida cai em valores de fallback definidos
//! - **Sem estado**: todas as funções são puras e seguras entre threads
//! - **Perfis validados**: [`DriveProfile`] rejeita RPM/diâmetro inválidos

pub mod error;
pub mod percent;
pub mod speed;

pub use error::{SpeedError, SpeedResult};
pub use percent::{normalize, PercentRange};
pub use speed::{
    angular_to_linear, linear_to_angular, max_angular_speed, max_linear_speed, speed_angular,
    speed_linear, DriveProfile, MotorPreset,
};

/// Presets físicos de motores e rodas do brick
pub mod constants {
    /// RPM nominal do motor médio (padrão para velocidade angular)
    pub const MEDIUM_MOTOR_RPM: f64 = 240.0;

    /// RPM nominal do motor grande (padrão para velocidade linear)
    pub const LARGE_MOTOR_RPM: f64 = 160.0;

    /// Diâmetro da roda padrão do kit (mm)
    pub const EV3_WHEEL_DIAMETER_MM: f64 = 56.0;

    /// Limite inferior padrão de percentual
    pub const DEFAULT_MIN_PERCENT: f64 = -100.0;

    /// Limite superior padrão de percentual
    pub const DEFAULT_MAX_PERCENT: f64 = 100.0;

    /// Graus por rotação completa
    pub const DEGREES_PER_ROTATION: f64 = 360.0;
}
