//! Pixel colors for a two-level panel.
//!
//! The panel is strictly on/off. [`Color::Invert`] flips whatever is already
//! there and [`Color::Transparent`] leaves the pixel alone, which lets masked
//! shapes (e.g. an outline-only triangle) share the solid drawing paths.

use embedded_graphics::pixelcolor::BinaryColor;

/// Color applied by a pixel write.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Pixel dark (bit cleared).
    #[default]
    Off,
    /// Pixel lit (bit set).
    On,
    /// Toggle the current pixel state.
    Invert,
    /// No-op: the existing pixel is preserved.
    Transparent,
}

impl Color {
    /// Color matching a stored bit, as returned by pixel reads.
    #[inline]
    pub const fn from_bit(lit: bool) -> Self { if lit { Self::On } else { Self::Off } }

    /// Whether a write with this color can change the framebuffer.
    #[inline]
    pub const fn is_visible(self) -> bool { !matches!(self, Self::Transparent) }

    /// Apply this color to the bits selected by `mask` in `byte`.
    #[inline]
    pub(crate) fn apply(
        self,
        byte: &mut u8,
        mask: u8,
    ) {
        match self {
            Self::On => *byte |= mask,
            Self::Off => *byte &= !mask,
            Self::Invert => *byte ^= mask,
            Self::Transparent => {}
        }
    }
}

impl From<BinaryColor> for Color {
    fn from(color: BinaryColor) -> Self {
        match color {
            BinaryColor::On => Self::On,
            BinaryColor::Off => Self::Off,
        }
    }
}
