//! Cores do sensor e matemática de reflexão

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DeviceError, DeviceResult};
use crate::sensors::bearing;
use crate::traits::Clock;
use crate::wait::Poller;

// ═══════════════════════════════════════════════════════════════════════════════
// COLOR
// ═══════════════════════════════════════════════════════════════════════════════

/// Cores detectáveis; a ausência de cor é `None` (número 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    Black = 1,
    Blue = 2,
    Green = 3,
    Yellow = 4,
    Red = 5,
    White = 6,
    Brown = 7,
    Orange = 8,
    Purple = 9,
}

impl Color {
    pub const ALL: [Color; 9] = [
        Color::Black,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Red,
        Color::White,
        Color::Brown,
        Color::Orange,
        Color::Purple,
    ];

    /// Número da cor; `None` vira 0
    pub fn to_number(color: Option<Color>) -> u8 {
        color.map(|c| c as u8).unwrap_or(0)
    }

    /// Cor a partir do número; 0 e desconhecidos viram `None`
    pub fn from_number(n: u8) -> Option<Color> {
        Color::try_from(n).ok()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Red => "red",
            Color::White => "white",
            Color::Brown => "brown",
            Color::Orange => "orange",
            Color::Purple => "purple",
        }
    }
}

impl TryFrom<u8> for Color {
    type Error = DeviceError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1..=9 => Ok(Color::ALL[(n - 1) as usize]),
            _ => Err(DeviceError::UnknownColor(n.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MATCHING
// ═══════════════════════════════════════════════════════════════════════════════

/// Cor esperada: uma só (ou nenhuma) ou um conjunto
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorMatch {
    One(Option<Color>),
    AnyOf(Vec<Color>),
}

impl ColorMatch {
    pub fn matches(&self, actual: Option<Color>) -> bool {
        color_matches(self, actual)
    }
}

impl From<Color> for ColorMatch {
    fn from(color: Color) -> Self {
        ColorMatch::One(Some(color))
    }
}

impl From<Option<Color>> for ColorMatch {
    fn from(color: Option<Color>) -> Self {
        ColorMatch::One(color)
    }
}

impl From<Vec<Color>> for ColorMatch {
    fn from(colors: Vec<Color>) -> Self {
        ColorMatch::AnyOf(colors)
    }
}

impl From<&[Color]> for ColorMatch {
    fn from(colors: &[Color]) -> Self {
        ColorMatch::AnyOf(colors.to_vec())
    }
}

/// Pertinência para conjuntos, igualdade caso contrário.
///
/// Um conjunto nunca contém a ausência de cor.
pub fn color_matches(expected: &ColorMatch, actual: Option<Color>) -> bool {
    match expected {
        ColorMatch::One(color) => *color == actual,
        ColorMatch::AnyOf(colors) => actual.is_some_and(|c| colors.contains(&c)),
    }
}

impl<C: Clock> Poller<C> {
    /// Espera até a cor lida casar com `expected`
    pub fn wait_until_color_is<F>(&self, mut read: F, expected: &ColorMatch) -> DeviceResult<()>
    where
        F: FnMut() -> DeviceResult<Option<Color>>,
    {
        self.wait_until(|| Ok(expected.matches(read()?)))
    }

    /// Espera até a cor lida deixar de casar com `expected`
    pub fn wait_until_color_not<F>(&self, mut read: F, expected: &ColorMatch) -> DeviceResult<()>
    where
        F: FnMut() -> DeviceResult<Option<Color>>,
    {
        self.wait_while(|| Ok(expected.matches(read()?)))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// REFLECTION
// ═══════════════════════════════════════════════════════════════════════════════

/// Leitura RGB bruta, cada canal de 0 a 100 %
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reflection {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Reflection {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Canais reescalados para 0..=255
    pub fn rgb_255(&self) -> (f64, f64, f64) {
        let scale = |v: f64| v * 255.0 / 100.0;
        (scale(self.r), scale(self.g), scale(self.b))
    }

    /// `rrggbb` em minúsculas
    pub fn hex(&self) -> String {
        let (r, g, b) = self.rgb_255();
        let byte = |v: f64| v.round().max(0.0).min(255.0) as u8;
        format!("{:02x}{:02x}{:02x}", byte(r), byte(g), byte(b))
    }

    /// `(h, s, v)` com h em graus [0, 360) e s, v em %
    pub fn hsv(&self) -> (f64, f64, f64) {
        let (r, g, b) = (self.r / 100.0, self.g / 100.0, self.b / 100.0);
        let mx = r.max(g).max(b);
        let mn = r.min(g).min(b);
        let df = mx - mn;

        let h = if df == 0.0 {
            0.0
        } else if mx == r {
            bearing(60.0 * ((g - b) / df))
        } else if mx == g {
            bearing(60.0 * ((b - r) / df) + 120.0)
        } else {
            bearing(60.0 * ((r - g) / df) + 240.0)
        };
        let s = if mx == 0.0 { 0.0 } else { df / mx * 100.0 };

        (h, s, mx * 100.0)
    }

    pub fn hue(&self) -> f64 {
        self.hsv().0
    }
}

impl From<(f64, f64, f64)> for Reflection {
    fn from((r, g, b): (f64, f64, f64)) -> Self {
        Self { r, g, b }
    }
}
