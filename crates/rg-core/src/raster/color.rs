//! RGBA colors

use core::fmt;

use serde::{Deserialize, Serialize};

/// Packed `0xRRGGBBAA` form of a color, used as a map key
pub type ColorKey = u32;

/// An RGBA color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    /// Fully transparent; the unoccupied state of a cell
    pub const CLEAR: Color = Color::rgba(0, 0, 0, 0);

    /// Opaque black; space outside the dungeon
    pub const VOID: Color = Color::rgba(0, 0, 0, 255);

    /// Opaque white; walkable floor
    pub const FLOOR: Color = Color::rgba(255, 255, 255, 255);

    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Opaque color from RGB channels
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 255)
    }

    /// A cell is clear when its alpha is zero, whatever its RGB channels
    pub const fn is_clear(&self) -> bool {
        self.alpha == 0
    }

    /// Whether this is one of the colors the builder reserves for itself
    pub fn is_reserved(&self) -> bool {
        *self == Color::VOID || *self == Color::FLOOR || self.is_clear()
    }

    /// Stable packed key
    pub const fn key(&self) -> ColorKey {
        u32::from_be_bytes([self.red, self.green, self.blue, self.alpha])
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    pub const fn from_array(rgba: [u8; 4]) -> Self {
        Self::rgba(rgba[0], rgba[1], rgba[2], rgba[3])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.red, self.green, self.blue, self.alpha
        )
    }
}
