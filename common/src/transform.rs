//! Logical-to-hardware pixel addressing.
//!
//! The panel is mounted rotated 180° and its COM lines are wired in the
//! alternative (interleaved) configuration, so the controller's row order does
//! not match the caller's. A logical `(x, y)` is mirrored on both axes and the
//! mirrored row is then split between the two vertical halves of GDDRAM:
//!
//! ```text
//! x' = W-1-x
//! y' = H-1-y
//! row = y'/2            (y' even, top half)
//! row = y'/2 + H/2      (y' odd,  bottom half)
//! byte = x' + (row / 8) * W,  bit = row % 8
//! ```
//!
//! [`to_hardware`] and [`to_logical`] are exact inverses over the visible
//! area. Nothing here holds state.

use crate::config::{BUFFER_SIZE, HEIGHT, WIDTH};

/// Location of one pixel in the bit-packed framebuffer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitAddress {
    /// Byte index into the framebuffer (`page * WIDTH + column`).
    pub index: usize,
    /// Bit within the byte, 0 = top row of the page.
    pub bit: u8,
}

impl BitAddress {
    /// Mask selecting this pixel's bit.
    #[inline]
    pub const fn mask(self) -> u8 { 1 << self.bit }

    /// Controller page holding this pixel.
    #[inline]
    pub const fn page(self) -> usize { self.index / WIDTH }

    /// Controller column holding this pixel.
    #[inline]
    pub const fn column(self) -> usize { self.index % WIDTH }
}

/// Whether a logical coordinate lies on the panel.
#[inline]
pub const fn in_bounds(
    x: i16,
    y: i16,
) -> bool {
    x >= 0 && y >= 0 && (x as usize) < WIDTH && (y as usize) < HEIGHT
}

/// Map a logical coordinate to its framebuffer bit, or `None` off-panel.
#[inline]
pub const fn to_hardware(
    x: i16,
    y: i16,
) -> Option<BitAddress> {
    if !in_bounds(x, y) {
        return None;
    }
    Some(map(x as usize, y as usize))
}

/// Map a framebuffer bit back to the logical coordinate that owns it.
///
/// Returns `None` for an index past the buffer or a bit above 7.
pub const fn to_logical(addr: BitAddress) -> Option<(i16, i16)> {
    if addr.index >= BUFFER_SIZE || addr.bit > 7 {
        return None;
    }
    let column = addr.column();
    let row = addr.page() * 8 + addr.bit as usize;
    let flipped_y = if row < HEIGHT / 2 { row * 2 } else { (row - HEIGHT / 2) * 2 + 1 };
    Some(((WIDTH - 1 - column) as i16, (HEIGHT - 1 - flipped_y) as i16))
}

/// Transform without the range check. `x < WIDTH` and `y < HEIGHT` must hold.
#[inline]
pub(crate) const fn map(
    x: usize,
    y: usize,
) -> BitAddress {
    let column = WIDTH - 1 - x;
    let flipped_y = HEIGHT - 1 - y;
    let row = (flipped_y >> 1) + if flipped_y & 1 == 1 { HEIGHT >> 1 } else { 0 };
    BitAddress {
        index: column + (row / 8) * WIDTH,
        bit: (row & 7) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners() {
        // Top-left logical pixel lands in the last column of the bottom half
        assert_eq!(to_hardware(0, 0), Some(BitAddress { index: 7 * WIDTH + 127, bit: 7 }));
        // Bottom-right logical pixel lands in the first column of page 0
        assert_eq!(to_hardware(127, 63), Some(BitAddress { index: 0, bit: 0 }));
        // y = 62 mirrors to row 1 (odd), which is the first row of the bottom half
        assert_eq!(to_hardware(127, 62), Some(BitAddress { index: 4 * WIDTH, bit: 0 }));
    }

    #[test]
    fn test_out_of_range_is_none() {
        assert_eq!(to_hardware(-1, 0), None);
        assert_eq!(to_hardware(0, -1), None);
        assert_eq!(to_hardware(128, 0), None);
        assert_eq!(to_hardware(0, 64), None);
        assert_eq!(to_hardware(i16::MIN, i16::MAX), None);
    }

    #[test]
    fn test_round_trip_every_pixel() {
        for y in 0..HEIGHT as i16 {
            for x in 0..WIDTH as i16 {
                let addr = to_hardware(x, y).unwrap();
                assert!(addr.index < BUFFER_SIZE);
                assert_eq!(to_logical(addr), Some((x, y)), "round trip failed at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_mapping_is_a_bijection() {
        let mut seen = [0u8; BUFFER_SIZE];
        for y in 0..HEIGHT as i16 {
            for x in 0..WIDTH as i16 {
                let addr = to_hardware(x, y).unwrap();
                assert_eq!(seen[addr.index] & addr.mask(), 0, "({x}, {y}) collides");
                seen[addr.index] |= addr.mask();
            }
        }
        assert!(seen.iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_to_logical_rejects_invalid() {
        assert_eq!(to_logical(BitAddress { index: BUFFER_SIZE, bit: 0 }), None);
        assert_eq!(to_logical(BitAddress { index: 0, bit: 8 }), None);
    }

    #[test]
    fn test_adjacent_rows_split_halves() {
        // Vertically adjacent logical rows alternate between the two halves
        let even = to_hardware(10, 63).unwrap();
        let odd = to_hardware(10, 62).unwrap();
        assert_eq!(even.page(), 0);
        assert_eq!(odd.page(), 4);
        assert_eq!(even.column(), odd.column());
    }
}
