//! Demo scene layout on the 128x64 panel.
//!
//! ```text
//!  0                 64                128
//!  +------------------+------------------+ 0
//!  |  spinning        |  bouncing line   |
//!  |  triangle        |                  |
//!  +------------------+------------------+ 52
//!  |  dither bar      |  frame counter   |
//!  +------------------+------------------+ 64
//! ```
//!
//! Everything is `const` so the per-frame drawing code does no layout math.

use oled_common::config::{HEIGHT, WIDTH};

// =============================================================================
// Regions
// =============================================================================

/// Bottom of the animation area (exclusive); the status strip starts here.
pub const STATUS_TOP: i16 = 52;

/// Left edge of the right-hand column.
pub const RIGHT_COLUMN_X: i16 = (WIDTH / 2) as i16;

// =============================================================================
// Spinning Triangle
// =============================================================================

/// Rotation center of the triangle.
pub const TRIANGLE_CENTER: (i16, i16) = (RIGHT_COLUMN_X / 2, STATUS_TOP / 2);

/// Distance from the center to each vertex.
pub const TRIANGLE_RADIUS: f32 = 23.0;

/// Rotation per frame in radians (one turn in about four seconds at 30 fps).
pub const TRIANGLE_STEP_RAD: f32 = 0.05;

// =============================================================================
// Bouncing Line
// =============================================================================

/// Inclusive box the line endpoints bounce inside.
pub const LINE_MIN: (i16, i16) = (RIGHT_COLUMN_X + 2, 1);
pub const LINE_MAX: (i16, i16) = (WIDTH as i16 - 2, STATUS_TOP - 3);

// =============================================================================
// Status Strip
// =============================================================================

/// Number of segments in the dither bar, one per shade level.
pub const DITHER_SEGMENTS: i16 = 5;

/// Width of one dither bar segment.
pub const DITHER_SEGMENT_WIDTH: i16 = 12;

/// Frames each shade level stays on a segment before the bar rotates.
pub const DITHER_FRAMES_PER_STEP: u32 = 8;

/// Baseline position of the frame counter text.
pub const COUNTER_POS: (i32, i32) = (RIGHT_COLUMN_X as i32 + 4, HEIGHT as i32 - 3);

// The bar must fit in the left column and the strip must fit on the panel
const _: () = assert!(DITHER_SEGMENTS * DITHER_SEGMENT_WIDTH <= RIGHT_COLUMN_X);
const _: () = assert!((STATUS_TOP as usize) < HEIGHT);
const _: () = assert!(LINE_MIN.0 < LINE_MAX.0 && LINE_MIN.1 < LINE_MAX.1);
