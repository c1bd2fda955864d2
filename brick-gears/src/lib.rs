//! # ⚙️ brick-gears — Relação de Transmissão
//!
//! Calcula a relação composta de trens de engrenagens, opcionalmente
//! truncada num estágio intermediário (`depth`).
//!
//! ## Modelo
//!
//! ```text
//!   Flat([12, 36])                 Trains([[12, 36], [20, 16, 40]])
//!
//!   12 ──▶ 36                      12 ──▶ 36
//!                                          ┆ (mesmo eixo)
//!                                          20 ──▶ 16 ──▶ 40
//!
//!   ratio = 12/36                  ratio = 12/36 · 20/16 · 16/40
//! ```
//!
//! Cada par adjacente dentro de um trem é um **engrenamento** e contribui
//! `entrada / saída`. Entre trens, a última engrenagem de um e a primeira do
//! próximo giram juntas no mesmo eixo e não contribuem fator; o contador de
//! engrenamentos continua através da fronteira.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use brick_gears::{gear_ratio, GearTrain};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let train = GearTrain::Flat(vec![12.0, 36.0]);
//! assert!((gear_ratio(&train, None)? - 1.0 / 3.0).abs() < 1e-12);
//! assert_eq!(gear_ratio(&train, Some(0))?, 1.0);
//!
//! let compound = GearTrain::parse("12:36/20:16:40")?;
//! assert!((gear_ratio(&compound, None)? - 1.0 / 6.0).abs() < 1e-12);
//! assert!((gear_ratio(&compound, Some(2))? - 5.0 / 12.0).abs() < 1e-12);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod ratio;
pub mod train;

pub use error::{GearError, GearResult};
pub use ratio::{gear_ratio, gear_ratio_value};
pub use train::{GearTrain, Mesh};
