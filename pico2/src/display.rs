//! Display bring-up for the SSD1306 module on I2C0.
//!
//! Pin mapping:
//! - SDA: GPIO4 (I2C0 SDA)
//! - SCL: GPIO5 (I2C0 SCL)
//! - RES: GPIO6 (active low)

use embassy_rp::gpio::Output;
use embassy_rp::i2c::Config as I2cConfig;
use embassy_time::Timer;

use crate::config::{I2C_FREQUENCY_HZ, RESET_POWER_UP_MS, RESET_PULSE_MS};

/// I2C configuration for the SSD1306.
pub fn display_i2c_config() -> I2cConfig {
    let mut config = I2cConfig::default();
    config.frequency = I2C_FREQUENCY_HZ;
    config
}

/// Pulse RES low to put the controller into a known state.
///
/// `reset` must start out driven high.
pub async fn reset_display(reset: &mut Output<'_>) {
    Timer::after_millis(RESET_POWER_UP_MS).await;
    reset.set_low();
    Timer::after_millis(RESET_PULSE_MS).await;
    reset.set_high();
}
