//! Colors for glow, particles and the ambient spotlight.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Error parsing a glow color triple.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// Not exactly three comma-separated channels.
    #[error("expected three comma-separated channels, got {0}")]
    ChannelCount(usize),
    /// A channel is not an integer in 0..=255.
    #[error("invalid channel value: {0:?}")]
    Channel(String),
}

/// The accent color shared by particles, border glow and the spotlight.
///
/// Written the way hosts write it in style rules: `"93, 205, 219"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GlowColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl GlowColor {
    /// Cyan accent used when nothing else is configured.
    pub const DEFAULT: Self = Self::new(93, 205, 219);

    /// Creates a glow color from channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns this color at the given alpha.
    #[must_use]
    pub fn alpha(self, a: f32) -> Color {
        Color::rgba(
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            a,
        )
    }
}

impl Default for GlowColor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for GlowColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ParseColorError::ChannelCount(parts.len()));
        }
        let channel = |raw: &str| {
            raw.parse::<u8>()
                .map_err(|_| ParseColorError::Channel(raw.to_string()))
        };
        Ok(Self::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?))
    }
}

impl TryFrom<String> for GlowColor {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GlowColor> for String {
    fn from(color: GlowColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for GlowColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_glow_color() {
        assert_eq!("93,205,219".parse::<GlowColor>(), Ok(GlowColor::DEFAULT));
        assert_eq!(" 93, 205 ,219 ".parse::<GlowColor>(), Ok(GlowColor::DEFAULT));
        assert_eq!(
            "1,2".parse::<GlowColor>(),
            Err(ParseColorError::ChannelCount(2))
        );
        assert_eq!(
            "1,2,256".parse::<GlowColor>(),
            Err(ParseColorError::Channel("256".to_string()))
        );
    }

    #[test]
    fn test_glow_color_alpha() {
        let color = GlowColor::new(255, 0, 51).alpha(0.7);
        assert!((color.r - 1.0).abs() < 0.001);
        assert!(color.g.abs() < 0.001);
        assert!((color.b - 0.2).abs() < 0.001);
        assert!((color.a - 0.7).abs() < 0.001);
    }
}
