//! RGBA color used for tints and color modulation.
//!
//! The particle pool tints each batch with its [`Rgba`]; the renderer keeps a
//! per-sprite color modulation of the same type in
//! [`SpriteState`](crate::render::SpriteState).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    /// Orange used by the weapon's muzzle flash.
    pub const MUZZLE_ORANGE: Rgba = Rgba::new(255, 85, 24, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Multiply this color with another (component-wise, 255 is identity).
    pub fn multiply(&self, other: Rgba) -> Rgba {
        Rgba::new(
            ((self.r as u16 * other.r as u16) / 255) as u8,
            ((self.g as u16 * other.g as u16) / 255) as u8,
            ((self.b as u16 * other.b as u16) / 255) as u8,
            ((self.a as u16 * other.a as u16) / 255) as u8,
        )
    }

    pub fn with_alpha(self, a: u8) -> Rgba {
        Rgba { a, ..self }
    }

    /// Parse `"r,g,b"` or `"r,g,b,a"` (alpha defaults to 255).
    pub fn parse(text: &str) -> Result<Rgba, String> {
        let parts: Vec<&str> = text.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(format!("Expected 3 or 4 color components, got '{}'", text));
        }
        let mut channels = [255u8; 4];
        for (slot, part) in channels.iter_mut().zip(parts.iter()) {
            *slot = part
                .parse::<u8>()
                .map_err(|e| format!("Invalid color component '{}': {}", part, e))?;
        }
        Ok(Rgba::new(channels[0], channels[1], channels[2], channels[3]))
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{},{}", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let c = Rgba::new(100, 150, 200, 255);
        assert_eq!(c.r, 100);
        assert_eq!(c.g, 150);
        assert_eq!(c.b, 200);
        assert_eq!(c.a, 255);
    }

    #[test]
    fn test_default_is_white() {
        assert_eq!(Rgba::default(), Rgba::WHITE);
    }

    #[test]
    fn test_multiply_with_white_is_identity() {
        let c = Rgba::new(100, 150, 200, 255);
        assert_eq!(c.multiply(Rgba::WHITE), c);
    }

    #[test]
    fn test_multiply_with_black_zeroes_out() {
        let c = Rgba::new(100, 150, 200, 255);
        assert_eq!(c.multiply(Rgba::new(0, 0, 0, 0)), Rgba::new(0, 0, 0, 0));
    }

    #[test]
    fn test_multiply_partial_values() {
        let result = Rgba::WHITE.multiply(Rgba::new(128, 64, 32, 255));
        assert_eq!(result, Rgba::new(128, 64, 32, 255));
    }

    #[test]
    fn test_with_alpha_keeps_rgb() {
        let c = Rgba::MUZZLE_ORANGE.with_alpha(10);
        assert_eq!(c, Rgba::new(255, 85, 24, 10));
    }

    #[test]
    fn test_parse_three_and_four_components() {
        assert_eq!(Rgba::parse("255, 85, 24").unwrap(), Rgba::MUZZLE_ORANGE);
        assert_eq!(Rgba::parse("1,2,3,4").unwrap(), Rgba::new(1, 2, 3, 4));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Rgba::parse("1,2").is_err());
        assert!(Rgba::parse("1,2,300").is_err());
        assert!(Rgba::parse("a,b,c").is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let c = Rgba::new(9, 8, 7, 6);
        assert_eq!(Rgba::parse(&c.to_string()).unwrap(), c);
    }
}
