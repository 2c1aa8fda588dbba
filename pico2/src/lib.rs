//! OLED demo library - host-testable parts of the Pico 2 firmware.
//!
//! The binary (`main.rs`) adds the RP2350 bring-up (reset pulse, I2C0, the
//! frame loop); everything here builds without ARM dependencies.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p oled-pico2 --lib --target x86_64-unknown-linux-gnu  # Linux/macOS
//! cargo test -p oled-pico2 --lib --target x86_64-pc-windows-msvc    # Windows
//! ```

#![cfg_attr(not(test), no_std)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod config;
pub mod scene;
