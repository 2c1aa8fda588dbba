//! Board wiring and timing for the SSD1306 module on a Pico 2.
//!
//! Pin mapping (I2C0):
//! - SDA: GPIO4
//! - SCL: GPIO5
//! - RES: GPIO6 (active low)
//!
//! The pins themselves are taken from `embassy_rp::Peripherals` in `main.rs`;
//! only the numeric settings live here so they can be checked on the host.

/// I2C bus frequency. The RP2350 I2C block tops out at fast mode.
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// Time the reset line is held high before the reset pulse.
pub const RESET_POWER_UP_MS: u64 = 1;

/// Reset pulse width (RES held low).
pub const RESET_PULSE_MS: u64 = 10;

/// Target time between frames (about 30 fps).
pub const FRAME_PERIOD_MS: u64 = 33;

// Fast mode plus is not supported by the peripheral
const _: () = assert!(I2C_FREQUENCY_HZ <= 400_000);
const _: () = assert!(FRAME_PERIOD_MS > 0);
