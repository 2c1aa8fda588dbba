//! Ordered-dither shading.
//!
//! Shading darkens a region by forcing a fixed pattern of pixels off, leaving
//! the rest untouched. Levels run from 0 (lightest, one pixel in four) to
//! [`MAX_SHADE_LEVEL`] (three pixels in four).

use crate::{color::Color, framebuffer::FrameStore};

/// Darkest supported level. Anything above is ignored.
pub const MAX_SHADE_LEVEL: u8 = 4;

/// Whether `(x, y)` is blacked out at the given level.
///
/// Remainders follow truncating division, so negative coordinates keep
/// negative remainders. The patterns are pixel-exact:
///
/// | level | pattern                               |
/// |-------|---------------------------------------|
/// | 0     | `y` even and `x` even                 |
/// | 1     | level 0, plus `x % 4 == 0`            |
/// | 2     | `y % 2 == x % 2`                      |
/// | 3     | `x` even and `y` even, plus `x % 4 < 3` |
/// | 4     | `y` even or `x` even                  |
pub const fn is_shaded(
    level: u8,
    x: i16,
    y: i16,
) -> bool {
    let x_even = x % 2 == 0;
    let y_even = y % 2 == 0;
    match level {
        0 => x_even && y_even,
        1 => (x_even && y_even) || x % 4 == 0,
        2 => y % 2 == x % 2,
        3 => (x_even && y_even) || x % 4 < 3,
        4 => x_even || y_even,
        _ => false,
    }
}

impl FrameStore {
    /// Shade the half-open region `[x1, x2) x [y1, y2)` at `level`.
    ///
    /// Pixels are clipped individually. Levels above [`MAX_SHADE_LEVEL`] do
    /// nothing.
    pub fn shade_rect(
        &mut self,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        level: u8,
    ) {
        if level > MAX_SHADE_LEVEL {
            return;
        }
        for y in y1..y2 {
            for x in x1..x2 {
                if is_shaded(level, x, y) {
                    self.set_pixel(x, y, Color::Off);
                }
            }
        }
    }
}
