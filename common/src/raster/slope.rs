//! Fixed-point slopes and per-scanline edge steps.

use crate::config::{FIXED_POINT_SHIFT, SHALLOW_EDGE_STEP};

/// Horizontal travel per row of an edge leaving the top vertex.
///
/// Used only to decide which of two edges is on the left. A horizontal edge
/// has no finite slope; it sorts before or after every finite one depending
/// on which way it points. Variant order gives `FlatLeft < Finite(_) <
/// FlatRight`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Slope {
    FlatLeft,
    /// `(dx << 16) / dy`, truncated toward zero.
    Finite(i64),
    FlatRight,
}

impl Slope {
    pub fn between(
        dx: i32,
        dy: i32,
    ) -> Self {
        if dy == 0 {
            if dx > 0 { Self::FlatRight } else { Self::FlatLeft }
        } else {
            Self::Finite((i64::from(dx) << FIXED_POINT_SHIFT) / i64::from(dy))
        }
    }
}

/// Unsigned x travel per scanline for a triangle edge.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeStep {
    /// `|dx| / |dy|` in 16.16, rounded to nearest.
    Finite(i64),
    /// The edge spans no rows at all.
    Flat,
}

impl EdgeStep {
    pub fn between(
        dx: i32,
        dy: i32,
    ) -> Self {
        let run = i64::from(dx).abs();
        let rise = i64::from(dy).abs();
        if rise == 0 {
            Self::Flat
        } else {
            Self::Finite(((run << FIXED_POINT_SHIFT) + rise / 2) / rise)
        }
    }

    /// Nearly or exactly parallel to the scanlines.
    #[inline]
    pub const fn is_shallow(self) -> bool {
        match self {
            Self::Finite(step) => step > SHALLOW_EDGE_STEP,
            Self::Flat => true,
        }
    }
}
