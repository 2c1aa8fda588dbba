//! Clipped primitives drawn straight into a [`FrameStore`].
//!
//! Both walkers use 16.16 fixed-point error accumulation with no division in
//! the inner loop. Public coordinates are `i16`; the walkers widen to `i32`
//! for positions and `i64` for fixed-point products so no input can overflow.
//!
//! Clipping is done up front (lines) or per scanline (triangles), so every
//! pixel that reaches the framebuffer goes through the unchecked write.
//!
//! [`FrameStore`]: crate::framebuffer::FrameStore

mod line;
mod slope;
mod triangle;

pub use slope::{EdgeStep, Slope};

/// A triangle corner in logical coordinates.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vertex {
    pub x: i16,
    pub y: i16,
}

impl Vertex {
    pub const fn new(
        x: i16,
        y: i16,
    ) -> Self {
        Self { x, y }
    }
}

impl From<(i16, i16)> for Vertex {
    fn from((x, y): (i16, i16)) -> Self { Self { x, y } }
}

/// Direction of travel along an axis. Zero counts as negative.
#[inline]
pub(crate) const fn direction(delta: i32) -> i32 { if delta > 0 { 1 } else { -1 } }
