//! SSD1306 OLED demo firmware for Raspberry Pi Pico 2 (RP2350).
//!
//! Drives a 128x64 SSD1306 module over I2C0 and animates the demo scene at
//! about 30 fps. Every frame is redrawn into the frame store and pushed with a
//! differential sync, so only the pages and columns that changed go over the
//! bus. A failed transfer is logged and the next frame is sent in full.
//!
//! The onboard LED (GPIO25) blinks as a heartbeat while frames are flowing.

#![no_std]
#![no_main]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod display;

mod config {
    pub use oled_pico2::config::*;
}

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::I2c;
use embassy_time::{Duration, Ticker, Timer};
use oled_common::{FrameStore, I2cBus, OledFlusher, SyncMode, SyncOutcome};
use oled_pico2::scene::DemoScene;
use {defmt_rtt as _, panic_probe as _};

use crate::config::FRAME_PERIOD_MS;
use crate::display::{display_i2c_config, reset_display};

/// Delay between attempts when the panel does not answer at boot.
const INIT_RETRY_MS: u64 = 500;

/// Frames per heartbeat LED toggle.
const HEARTBEAT_FRAMES: u32 = 15;

/// Frames between progress log lines.
const LOG_EVERY_FRAMES: u32 = 300;

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"pico2-oled"),
    embassy_rp::binary_info::rp_program_description!(c"SSD1306 128x64 OLED demo over I2C"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("OLED demo starting...");

    let p = embassy_rp::init(Default::default());

    let mut led = Output::new(p.PIN_25, Level::Low);

    // RES idles high; pulse it before talking to the controller
    let mut reset = Output::new(p.PIN_6, Level::High);
    reset_display(&mut reset).await;

    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, display_i2c_config());
    let mut oled = OledFlusher::new(I2cBus::new(i2c));
    let mut store = FrameStore::new();

    while let Err(err) = oled.init(&mut store) {
        warn!("Display init failed: {}, retrying", err);
        Timer::after_millis(INIT_RETRY_MS).await;
    }
    info!("Display initialized");

    let mut scene = DemoScene::new();
    let mut ticker = Ticker::every(Duration::from_millis(FRAME_PERIOD_MS));
    let mut dropped: u32 = 0;

    loop {
        scene.render(&mut store);
        let frame = scene.frame();

        match oled.sync(&mut store, SyncMode::Differential) {
            SyncOutcome::FrameNotDrawn(err) => {
                dropped = dropped.saturating_add(1);
                warn!("Frame {} not drawn: {}", frame, err);
            }
            SyncOutcome::FrameDrawn | SyncOutcome::NothingToDo => {
                if frame % HEARTBEAT_FRAMES == 0 {
                    led.toggle();
                }
            }
        }

        if frame % LOG_EVERY_FRAMES == 0 {
            info!("{} frames, {} dropped", frame, dropped);
        }

        ticker.next().await;
    }
}
