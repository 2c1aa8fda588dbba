//! Application configuration.
//!
//! - `board`: Pin mapping, bus frequency and frame timing
//! - `layout`: Demo scene geometry

pub mod board;
pub mod layout;

// Re-export at config level for convenience
pub use board::{FRAME_PERIOD_MS, I2C_FREQUENCY_HZ, RESET_POWER_UP_MS, RESET_PULSE_MS};
pub use layout::{
    COUNTER_POS,
    DITHER_FRAMES_PER_STEP,
    DITHER_SEGMENT_WIDTH,
    DITHER_SEGMENTS,
    LINE_MAX,
    LINE_MIN,
    RIGHT_COLUMN_X,
    STATUS_TOP,
    TRIANGLE_CENTER,
    TRIANGLE_RADIUS,
    TRIANGLE_STEP_RAD,
};
