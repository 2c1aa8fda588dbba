//! Clipped fixed-point line walker.

use super::direction;
use crate::{
    color::Color,
    config::{FIXED_HALF, FIXED_ONE, FIXED_POINT_SHIFT, HEIGHT_I32, WIDTH_I32},
    framebuffer::FrameStore,
};

/// Ratio of the minor to the major extent in 16.16, rounded to nearest.
#[inline]
fn step_ratio(
    minor: i32,
    major: i32,
) -> i64 {
    let major = i64::from(major);
    ((i64::from(minor) << FIXED_POINT_SHIFT) + major / 2) / major
}

/// Pull `value` into `0..=max`, returning the distance it moved.
#[inline]
fn clamp_axis(
    value: &mut i32,
    max: i32,
) -> i32 {
    if *value < 0 {
        let moved = -*value;
        *value = 0;
        moved
    } else if *value > max {
        let moved = *value - max;
        *value = max;
        moved
    } else {
        0
    }
}

/// Shift along the minor axis by `ratio * distance`, rounding toward -inf.
#[inline]
fn offset(
    ratio: i64,
    distance: i32,
    dir: i32,
) -> i32 {
    (((ratio * i64::from(distance)) * i64::from(dir)) >> FIXED_POINT_SHIFT) as i32
}

/// Both values beyond the same edge of `0..=max`.
#[inline]
const fn same_side_out(
    a: i32,
    b: i32,
    max: i32,
) -> bool {
    (a < 0 && b < 0) || (a > max && b > max)
}

/// Whether the clamped start still heads toward `end` along one axis.
#[inline]
const fn heads_toward(
    delta: i32,
    start: i32,
    end: i32,
    max: i32,
) -> bool {
    if delta > 0 {
        start <= max && start <= end
    } else if delta < 0 {
        start >= 0 && start >= end
    } else {
        true
    }
}

impl FrameStore {
    /// Draw a line from `(x0, y0)` to `(x1, y1)`, both ends inclusive.
    ///
    /// The start point is pulled onto the panel along the line's own slope,
    /// then the walk stops at the first pixel past the panel edge, so no pixel
    /// is ever tested individually. With `thick`, every minor-axis step also
    /// fills the corner pixel, giving a line two pixels wide.
    pub fn draw_line(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        color: Color,
        thick: bool,
    ) {
        if !color.is_visible() {
            return;
        }

        let (mut x1, mut y1) = (i32::from(x1), i32::from(y1));
        let (mut cx, mut cy) = (i32::from(x0), i32::from(y0));
        let max_x = WIDTH_I32 - 1;
        let max_y = HEIGHT_I32 - 1;

        if same_side_out(cx, x1, max_x) || same_side_out(cy, y1, max_y) {
            return;
        }

        let dx = x1 - cx;
        let dy = y1 - cy;
        let sdx = direction(dx);
        let sdy = direction(dy);
        let run = dx.abs();
        let rise = dy.abs();
        let mut y_step = 0;
        let mut x_step = 0;

        // Pull the start onto the panel, sliding the other axis with it
        if run > 0 {
            let moved = clamp_axis(&mut cx, max_x);
            if moved != 0 || rise <= run {
                y_step = step_ratio(rise, run);
                if moved != 0 {
                    cy += offset(y_step, moved, sdy);
                    if same_side_out(cy, y1, max_y) {
                        return;
                    }
                }
            }
        }
        if rise > 0 {
            let moved = clamp_axis(&mut cy, max_y);
            if moved != 0 || rise > run {
                x_step = step_ratio(run, rise);
                if moved != 0 {
                    cx += offset(x_step, moved, sdx);
                    if same_side_out(cx, x1, max_x) {
                        return;
                    }
                }
            }
        }

        if cx == x1 && cy == y1 {
            self.plot(cx, cy, color);
            return;
        }

        // Clamping overshot, or the line only grazes the panel corner
        if !heads_toward(dx, cx, x1, max_x) || !heads_toward(dy, cy, y1, max_y) {
            return;
        }

        // The minor-axis end sits one step past the clamped end: reaching it
        // means the walk left the panel.
        if rise > run {
            x1 = x1.clamp(0, max_x) + sdx;
            y1 = y1.clamp(0, max_y);
            let mut err = FIXED_HALF;
            while cy != y1 {
                self.plot(cx, cy, color);
                err += x_step;
                while err >= FIXED_ONE {
                    cx += sdx;
                    if cx == x1 {
                        return;
                    }
                    if thick {
                        self.plot(cx, cy, color);
                    }
                    err -= FIXED_ONE;
                }
                cy += sdy;
            }
        } else {
            y1 = y1.clamp(0, max_y) + sdy;
            x1 = x1.clamp(0, max_x);
            let mut err = FIXED_HALF;
            while cx != x1 {
                self.plot(cx, cy, color);
                err += y_step;
                while err >= FIXED_ONE {
                    cy += sdy;
                    if cy == y1 {
                        return;
                    }
                    if thick {
                        self.plot(cx, cy, color);
                    }
                    err -= FIXED_ONE;
                }
                cx += sdx;
            }
        }
        self.plot(cx, cy, color);
    }

    #[inline]
    pub(crate) fn plot(
        &mut self,
        x: i32,
        y: i32,
        color: Color,
    ) {
        self.set_pixel_unchecked(x as i16, y as i16, color);
    }
}
