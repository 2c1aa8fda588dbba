//! Framebuffer, rasterizer and display sync for a 128x64 SSD1306 OLED.
//!
//! This crate is platform-agnostic: it knows the panel's memory layout and
//! command set but reaches the hardware only through the [`Bus`] trait, so
//! everything here runs under host tests.
//!
//! - [`config`]: Panel geometry, bus address and fixed-point constants
//! - [`color`]: Pixel write colors, including invert and transparent
//! - [`transform`]: Logical coordinate to framebuffer bit mapping
//! - [`framebuffer`]: Double-buffered [`FrameStore`] and its `DrawTarget` impl
//! - [`shade`]: Ordered-dither region shading
//! - [`raster`]: Clipped lines and outlined triangles
//! - [`ssd1306`]: Controller command encoding
//! - [`bus`]: Bus transaction primitive and the embedded-hal I2C adapter
//! - [`sync`]: Full and differential frame transfer
//!
//! # Typical Use
//!
//! ```ignore
//! let mut store = FrameStore::new();
//! let mut oled = OledFlusher::new(I2cBus::new(i2c));
//! oled.init(&mut store)?;
//!
//! loop {
//!     store.clear();
//!     store.draw_line(0, 0, 127, 63, Color::On, false);
//!     oled.sync(&mut store, SyncMode::Differential);
//! }
//! ```
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` and allocation-free outside tests. Enable the
//! `defmt` feature to get log output and `defmt::Format` on public types.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Must come first so the macros are visible to the modules below
#[macro_use]
mod log;

pub mod bus;
pub mod color;
pub mod config;
pub mod framebuffer;
pub mod raster;
pub mod shade;
pub mod ssd1306;
pub mod sync;
pub mod transform;

// Re-export commonly used items
pub use bus::{Bus, BusError, I2cBus, WriteKind};
pub use color::Color;
pub use framebuffer::{FrameStore, Framebuffer};
pub use raster::Vertex;
pub use sync::{OledFlusher, SyncMode, SyncOutcome};
