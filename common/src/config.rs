//! Display geometry, bus and fixed-point configuration constants.
//!
//! # Panel Organization
//!
//! The SSD1306 stores its 128x64 pixels as 8 horizontal *pages* of 128 bytes.
//! Each byte is one column of 8 vertically stacked pixels, LSB on top. The
//! framebuffer mirrors that layout exactly so a page can be streamed to the
//! controller without repacking.
//!
//! All values are `const` so geometry arithmetic is folded at compile time,
//! and the `const _` assertions reject an inconsistent configuration at build
//! time rather than at runtime.

// =============================================================================
// Display Geometry
// =============================================================================

/// Display width in pixels (one byte per column per page).
pub const WIDTH: usize = 128;

/// Display height in pixels.
pub const HEIGHT: usize = 64;

/// Number of 8-pixel pages the controller addresses.
pub const PAGES: usize = HEIGHT / 8;

/// Size of one bit-packed framebuffer in bytes (1,024 bytes for 128x64).
pub const BUFFER_SIZE: usize = WIDTH * PAGES;

/// Width as a signed value for coordinate math in the rasterizers.
pub const WIDTH_I32: i32 = WIDTH as i32;

/// Height as a signed value for coordinate math in the rasterizers.
pub const HEIGHT_I32: i32 = HEIGHT as i32;

// Pages are whole bytes, and the row interleave splits the panel into two
// halves that must each start on a page boundary.
const _: () = assert!(HEIGHT % 16 == 0);
// Column addresses are sent as two nibbles.
const _: () = assert!(WIDTH <= 256);
// Logical coordinates are i16.
const _: () = assert!(WIDTH < i16::MAX as usize && HEIGHT < i16::MAX as usize);

// =============================================================================
// Bus Configuration
// =============================================================================

/// 7-bit I2C address of the controller (0x78 in 8-bit write form).
pub const I2C_ADDRESS: u8 = 0x78 >> 1;

/// Clock rate hint passed when a bus transaction begins, in kHz.
pub const BUS_CLOCK_KHZ: u32 = 800;

// =============================================================================
// Fixed-Point Configuration
// =============================================================================

/// Fractional bits used by the line and triangle walkers.
pub const FIXED_POINT_SHIFT: u32 = 16;

/// 1.0 in 16.16 fixed point. Crossing this moves the minor axis one pixel.
pub const FIXED_ONE: i64 = 1 << FIXED_POINT_SHIFT;

/// 0.5 in 16.16 fixed point. Error accumulators start here so steps round.
pub const FIXED_HALF: i64 = 1 << (FIXED_POINT_SHIFT - 1);

/// Per-scanline triangle edge step above which the edge is treated as nearly
/// parallel to the scanline (about 15 pixels of x per row).
pub const SHALLOW_EDGE_STEP: i64 = 1_000_000;

const _: () = assert!(SHALLOW_EDGE_STEP > FIXED_ONE);

// =============================================================================
// Unit Tests
// =============================================================================
