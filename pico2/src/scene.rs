//! Animated demo scene.
//!
//! Each frame is redrawn from scratch into the [`FrameStore`]; the differential
//! sync then only sends what actually moved. The scene exercises every drawing
//! path: a spinning triangle (alternating filled and outline-only), a thick
//! bouncing line, a dither bar cycling through the shade levels and a ProFont
//! frame counter drawn through embedded-graphics.

use core::f32::consts::{FRAC_PI_3, TAU};
use core::fmt::Write;

use embedded_graphics::{
    Drawable,
    mono_font::MonoTextStyle,
    pixelcolor::BinaryColor,
    prelude::Point,
    text::Text,
};
use heapless::String;
use oled_common::{Color, FrameStore, Vertex, config::WIDTH, shade::MAX_SHADE_LEVEL};
use profont::PROFONT_9_POINT;

use crate::config::{
    COUNTER_POS,
    DITHER_FRAMES_PER_STEP,
    DITHER_SEGMENT_WIDTH,
    DITHER_SEGMENTS,
    LINE_MAX,
    LINE_MIN,
    STATUS_TOP,
    TRIANGLE_CENTER,
    TRIANGLE_RADIUS,
    TRIANGLE_STEP_RAD,
};

const COUNTER_STYLE: MonoTextStyle<'static, BinaryColor> =
    MonoTextStyle::new(&PROFONT_9_POINT, BinaryColor::On);

/// Frames between switching the triangle between filled and outline-only.
const FILL_TOGGLE_FRAMES: u32 = 64;

/// Angle between triangle vertices.
const THIRD_TURN: f32 = 2.0 * FRAC_PI_3;

/// Round half away from zero.
#[inline]
fn round_i16(value: f32) -> i16 {
    if value >= 0.0 { (value + 0.5) as i16 } else { (value - 0.5) as i16 }
}

/// Vertices of the spinning triangle at `angle` radians.
pub fn triangle_vertices(angle: f32) -> [Vertex; 3] {
    let (cx, cy) = TRIANGLE_CENTER;
    core::array::from_fn(|k| {
        let a = angle + k as f32 * THIRD_TURN;
        let dx = micromath::F32(a).cos().0 * TRIANGLE_RADIUS;
        let dy = micromath::F32(a).sin().0 * TRIANGLE_RADIUS;
        Vertex::new(cx + round_i16(dx), cy + round_i16(dy))
    })
}

/// Shade level shown by dither bar `segment` on `frame`.
pub fn segment_level(
    segment: i16,
    frame: u32,
) -> u8 {
    let levels = u32::from(MAX_SHADE_LEVEL) + 1;
    ((segment as u32 + frame / DITHER_FRAMES_PER_STEP) % levels) as u8
}

/// Advance one coordinate, reflecting off `min`/`max`.
fn bounce(
    pos: &mut i16,
    vel: &mut i16,
    min: i16,
    max: i16,
) {
    *pos += *vel;
    if *pos <= min {
        *pos = min;
        *vel = vel.abs();
    } else if *pos >= max {
        *pos = max;
        *vel = -vel.abs();
    }
}

// =============================================================================
// Bouncing Line
// =============================================================================

/// A line whose endpoints each bounce around the line box independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BouncingLine {
    pub start: (i16, i16),
    pub end: (i16, i16),
    start_vel: (i16, i16),
    end_vel: (i16, i16),
}

impl Default for BouncingLine {
    fn default() -> Self { Self::new() }
}

impl BouncingLine {
    pub const fn new() -> Self {
        Self {
            start: (LINE_MIN.0, LINE_MIN.1 + 4),
            end: (LINE_MAX.0 - 6, LINE_MAX.1),
            start_vel: (2, 1),
            end_vel: (-1, -2),
        }
    }

    pub fn step(&mut self) {
        bounce(&mut self.start.0, &mut self.start_vel.0, LINE_MIN.0, LINE_MAX.0);
        bounce(&mut self.start.1, &mut self.start_vel.1, LINE_MIN.1, LINE_MAX.1);
        bounce(&mut self.end.0, &mut self.end_vel.0, LINE_MIN.0, LINE_MAX.0);
        bounce(&mut self.end.1, &mut self.end_vel.1, LINE_MIN.1, LINE_MAX.1);
    }
}

// =============================================================================
// Scene
// =============================================================================

pub struct DemoScene {
    frame: u32,
    angle: f32,
    line: BouncingLine,
}

impl Default for DemoScene {
    fn default() -> Self { Self::new() }
}

impl DemoScene {
    pub const fn new() -> Self {
        Self {
            frame: 0,
            angle: 0.0,
            line: BouncingLine::new(),
        }
    }

    /// Frames rendered so far.
    pub const fn frame(&self) -> u32 { self.frame }

    pub const fn line(&self) -> &BouncingLine { &self.line }

    /// Draw the current frame into `store`, then advance the animation.
    pub fn render(
        &mut self,
        store: &mut FrameStore,
    ) {
        store.clear();

        let [a, b, c] = triangle_vertices(self.angle);
        let fill = if (self.frame / FILL_TOGGLE_FRAMES) % 2 == 0 { Color::On } else { Color::Transparent };
        store.draw_triangle(a, b, c, fill, Color::On);

        let BouncingLine { start, end, .. } = self.line;
        store.draw_line(start.0, start.1, end.0, end.1, Color::On, true);

        // Status strip
        store.draw_line(0, STATUS_TOP - 1, WIDTH as i16 - 1, STATUS_TOP - 1, Color::On, false);
        for segment in 0..DITHER_SEGMENTS {
            let x = segment * DITHER_SEGMENT_WIDTH;
            store.fill_rect(x, STATUS_TOP + 1, x + DITHER_SEGMENT_WIDTH - 2, 63, Color::On);
            store.shade_rect(
                x,
                STATUS_TOP + 1,
                x + DITHER_SEGMENT_WIDTH - 1,
                64,
                segment_level(segment, self.frame),
            );
        }

        let mut counter: String<12> = String::new();
        let _ = write!(counter, "#{}", self.frame);
        let position = Point::new(COUNTER_POS.0, COUNTER_POS.1);
        Text::new(&counter, position, COUNTER_STYLE).draw(store).ok();

        self.frame = self.frame.wrapping_add(1);
        self.angle += TRIANGLE_STEP_RAD;
        if self.angle >= TAU {
            self.angle -= TAU;
        }
        self.line.step();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RIGHT_COLUMN_X;

    fn lit_in(
        store: &FrameStore,
        xs: core::ops::Range<i16>,
        ys: core::ops::Range<i16>,
    ) -> usize {
        ys.flat_map(|y| xs.clone().map(move |x| (x, y)))
            .filter(|&(x, y)| store.get_pixel(x, y) == Color::On)
            .count()
    }

    #[test]
    fn test_round_i16() {
        assert_eq!(round_i16(1.4), 1);
        assert_eq!(round_i16(1.5), 2);
        assert_eq!(round_i16(-1.5), -2);
        assert_eq!(round_i16(-0.2), 0);
    }

    #[test]
    fn test_triangle_vertices_stay_in_left_column() {
        let (cx, cy) = TRIANGLE_CENTER;
        let mut angle = 0.0;
        while angle < TAU {
            for v in triangle_vertices(angle) {
                let (dx, dy) = (i32::from(v.x - cx), i32::from(v.y - cy));
                let r = TRIANGLE_RADIUS as i32 + 1;
                assert!(dx * dx + dy * dy <= r * r, "{v:?} at {angle}");
                assert!(v.x >= 0 && v.x < RIGHT_COLUMN_X && v.y >= 0 && v.y < STATUS_TOP);
            }
            angle += 0.1;
        }
    }

    #[test]
    fn test_first_vertex_at_zero_angle() {
        let [first, ..] = triangle_vertices(0.0);
        assert_eq!(first, Vertex::new(TRIANGLE_CENTER.0 + TRIANGLE_RADIUS as i16, TRIANGLE_CENTER.1));
    }

    #[test]
    fn test_segment_levels_cover_all_shades() {
        let mut levels: std::vec::Vec<u8> = (0..DITHER_SEGMENTS).map(|s| segment_level(s, 0)).collect();
        levels.sort_unstable();
        assert_eq!(levels, vec![0, 1, 2, 3, 4]);
        // Rotates one step every DITHER_FRAMES_PER_STEP frames
        assert_eq!(segment_level(0, DITHER_FRAMES_PER_STEP - 1), 0);
        assert_eq!(segment_level(0, DITHER_FRAMES_PER_STEP), 1);
        assert_eq!(segment_level(4, DITHER_FRAMES_PER_STEP), 0);
    }

    #[test]
    fn test_bouncing_line_stays_in_box() {
        let mut line = BouncingLine::new();
        let mut moved = false;
        for _ in 0..1000 {
            let before = line;
            line.step();
            moved |= line != before;
            for (x, y) in [line.start, line.end] {
                assert!((LINE_MIN.0..=LINE_MAX.0).contains(&x));
                assert!((LINE_MIN.1..=LINE_MAX.1).contains(&y));
            }
        }
        assert!(moved);
    }

    #[test]
    fn test_render_draws_every_element() {
        let mut scene = DemoScene::new();
        let mut store = FrameStore::new();
        scene.render(&mut store);

        assert!(store.is_dirty());
        assert_eq!(scene.frame(), 1);
        // Triangle
        let (cx, cy) = TRIANGLE_CENTER;
        assert_eq!(store.get_pixel(cx, cy), Color::On);
        // Separator
        assert!((0..WIDTH as i16).all(|x| store.get_pixel(x, STATUS_TOP - 1) == Color::On));
        // Dither bar is partly lit, partly shaded
        let bar_width = DITHER_SEGMENTS * DITHER_SEGMENT_WIDTH;
        let bar_lit = lit_in(&store, 0..bar_width, STATUS_TOP + 1..64);
        assert!(bar_lit > 0 && bar_lit < (bar_width * (64 - STATUS_TOP - 1)) as usize);
        // Counter text
        assert!(lit_in(&store, RIGHT_COLUMN_X..WIDTH as i16, STATUS_TOP + 1..64) > 0);
        // Line endpoints
        let start = BouncingLine::new().start;
        assert_eq!(store.get_pixel(start.0, start.1), Color::On);
    }

    #[test]
    fn test_triangle_alternates_fill() {
        let mut scene = DemoScene::new();
        let mut store = FrameStore::new();
        scene.render(&mut store);
        let (cx, cy) = TRIANGLE_CENTER;
        assert_eq!(store.get_pixel(cx, cy), Color::On);

        for _ in 1..=FILL_TOGGLE_FRAMES {
            scene.render(&mut store);
        }
        // Outline-only phase leaves the center dark
        assert_eq!(store.get_pixel(cx, cy), Color::Off);
    }

    #[test]
    fn test_many_frames_render() {
        let mut scene = DemoScene::new();
        let mut store = FrameStore::new();
        for _ in 0..500 {
            scene.render(&mut store);
        }
        assert_eq!(scene.frame(), 500);
    }
}
