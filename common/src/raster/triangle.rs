//! Scanline triangle fill with a separate outline color.
//!
//! The triangle is split at the middle vertex. The upper half walks the two
//! edges leaving the top vertex; the lower half swaps whichever edge ended
//! first for the edge joining the two lower vertices. Edge x positions
//! advance with a 16.16 error accumulator, and every intermediate x an edge
//! passes through on a scanline is drawn in the outline color so steep and
//! shallow edges both come out gap-free.

use super::{EdgeStep, Slope, Vertex, direction};
use crate::{
    color::Color,
    config::{FIXED_HALF, FIXED_ONE, HEIGHT_I32, WIDTH_I32},
    framebuffer::FrameStore,
};

#[inline]
const fn column_visible(x: i32) -> bool { x >= 0 && x < WIDTH_I32 }

#[inline]
const fn row_visible(y: i32) -> bool { y >= 0 && y < HEIGHT_I32 }

/// One side of the triangle being walked down the scanlines.
#[derive(Clone, Copy, Debug)]
struct Edge {
    x: i32,
    dir: i32,
    step: EdgeStep,
    err: i64,
}

impl Edge {
    fn new(
        from: Vertex,
        to: Vertex,
    ) -> Self {
        let dx = i32::from(to.x) - i32::from(from.x);
        let dy = i32::from(to.y) - i32::from(from.y);
        Self {
            x: i32::from(from.x),
            dir: direction(dx),
            step: EdgeStep::between(dx, dy),
            err: FIXED_HALF,
        }
    }

    /// Add one scanline's worth of travel.
    #[inline]
    fn accumulate(&mut self) {
        if let EdgeStep::Finite(step) = self.step {
            self.err += step;
        }
    }

    /// Whether a whole pixel of travel is owed. A flat edge always owes one,
    /// so it is only ever walked toward a stopping condition.
    #[inline]
    fn pending(&self) -> bool {
        match self.step {
            EdgeStep::Finite(_) => self.err >= FIXED_ONE,
            EdgeStep::Flat => true,
        }
    }

    #[inline]
    fn advance(&mut self) {
        self.x += self.dir;
        if let EdgeStep::Finite(_) = self.step {
            self.err -= FIXED_ONE;
        }
    }
}

impl FrameStore {
    /// Fill the triangle `v0 v1 v2` with `fill`, edges drawn in `outline`.
    ///
    /// Either color may be [`Color::Transparent`] to draw only the outline or
    /// only the interior. Vertex order does not matter. Degenerate triangles
    /// draw a sliver, a point or nothing.
    pub fn draw_triangle(
        &mut self,
        v0: Vertex,
        v1: Vertex,
        v2: Vertex,
        fill: Color,
        outline: Color,
    ) {
        let (mut top, mut left, mut right) = (v0, v1, v2);
        if top.y > left.y {
            core::mem::swap(&mut top, &mut left);
        }
        if top.y > right.y {
            core::mem::swap(&mut top, &mut right);
        }

        let slope_to = |v: Vertex| {
            Slope::between(i32::from(v.x) - i32::from(top.x), i32::from(v.y) - i32::from(top.y))
        };
        if slope_to(right) < slope_to(left) {
            core::mem::swap(&mut left, &mut right);
        }

        let mut a = Edge::new(top, left);
        let mut b = Edge::new(top, right);
        let (left_x, right_x) = (i32::from(left.x), i32::from(right.x));

        // Upper half: both edges leave the top vertex
        let mut y = i32::from(top.y);
        let split = i32::from(left.y.min(right.y));
        while y < split {
            let visible = row_visible(y);
            if visible {
                self.span(a.x, b.x, y, fill, outline);
            }
            a.accumulate();
            b.accumulate();
            while a.pending() && a.x != left_x {
                a.advance();
                if visible && column_visible(a.x) {
                    self.plot(a.x, y, outline);
                }
            }
            while b.pending() && b.x != right_x {
                b.advance();
                if visible && column_visible(b.x) {
                    self.plot(b.x, y, outline);
                }
            }
            y += 1;
        }

        // Lower half: the edge that ended is replaced by the bottom edge
        if left.y < right.y {
            a = Edge::new(left, right);
        } else {
            b = Edge::new(right, left);
        }
        let y_end = i32::from(left.y.max(right.y)).min(HEIGHT_I32 - 1);

        if a.step.is_shallow() || b.step.is_shallow() {
            // Force the edges to close on each other so the walk ends
            if a.x < b.x {
                a.dir = 1;
                b.dir = -1;
            } else if a.x > b.x {
                a.dir = -1;
                b.dir = 1;
            } else {
                if column_visible(a.x) && row_visible(y) {
                    self.plot(a.x, y, outline);
                }
                return;
            }
        }

        while y <= y_end {
            let visible = row_visible(y);
            if visible {
                self.span(a.x, b.x, y, fill, outline);
            }
            a.accumulate();
            b.accumulate();
            while a.pending() {
                a.advance();
                if visible && column_visible(a.x) {
                    self.plot(a.x, y, outline);
                }
                if a.x == b.x {
                    return;
                }
            }
            while b.pending() {
                b.advance();
                if visible && column_visible(b.x) {
                    self.plot(b.x, y, outline);
                }
                if a.x == b.x {
                    return;
                }
            }
            y += 1;
        }
    }

    /// One scanline: outline at both ends when on-panel, fill strictly
    /// between. `y` must be a visible row.
    fn span(
        &mut self,
        left: i32,
        right: i32,
        y: i32,
        fill: Color,
        outline: Color,
    ) {
        let mut x = left.max(0);
        let end = right.min(WIDTH_I32);
        if column_visible(left) {
            self.plot(left, y, outline);
            x += 1;
        }
        while x < end {
            self.plot(x, y, fill);
            x += 1;
        }
        if column_visible(right) {
            self.plot(right, y, outline);
        }
    }
}
