//! Thermion - Remote Temperature Display Firmware
//!
//! ESP32 firmware that fetches an outdoor temperature over Wi-Fi and
//! drives a remote two-digit 7-segment panel over a 3-wire open-drain
//! serial link (clock, data, latch).

#![no_std]
#![no_main]

extern crate alloc;

use defmt::*;
use embassy_executor::Spawner;
use esp_hal::delay::Delay;
use esp_hal::gpio::Flex;
use esp_hal::timer::timg::TimerGroup;
use {esp_backtrace as _, esp_println as _};

use thermion_core::config::{LinkTiming, SessionConfig};
use thermion_drivers::FrameTransmitter;

use crate::pins::LinkPin;

mod channels;
mod pins;
mod tasks;

// Wi-Fi and source configuration injected at build time.
pub const WIFI_SSID: &str = env!("THERMION_WIFI_SSID");
pub const WIFI_PSK: &str = env!("THERMION_WIFI_PSK");

/// Hostname of the temperature source
pub const SOURCE_HOST: &str = env!("THERMION_SOURCE_HOST");

/// Path of the temperature resource on the source
pub const SOURCE_PATH: &str = match option_env!("THERMION_SOURCE_PATH") {
    Some(path) => path,
    None => "/api/v1/temperature",
};

pub const SOURCE_PORT: u16 = 80;

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) {
    let peripherals = esp_hal::init(esp_hal::Config::default());

    // Heap for the Wi-Fi stack; application code stays allocation-free.
    esp_alloc::heap_allocator!(size: 64 * 1024);

    // Preemptive scheduler for esp-radio + embassy-net.
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("Thermion firmware starting");

    // Link wires to the panel's shift register.
    let clock = LinkPin::new(Flex::new(peripherals.GPIO26));
    let data = LinkPin::new(Flex::new(peripherals.GPIO33));
    let latch = LinkPin::new(Flex::new(peripherals.GPIO25));

    let transmitter =
        FrameTransmitter::new(clock, data, latch, Delay::new(), LinkTiming::default());

    spawner
        .spawn(tasks::display_task(transmitter, SessionConfig::default()))
        .unwrap();

    tasks::net::spawn_network(&spawner, peripherals.WIFI);

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
