//! panelbridge Firmware
//!
//! Brings up an SSD1312 128x64 OLED on an STM32F407 over SPI3
//! (SCK=PC10, MOSI=PC12, CS=PA15, DC=PD2, RESET=PB3).

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::spi::{self, Spi};
use embassy_stm32::time::Hertz;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use panelbridge_core::{ControlPins, GpioDelayAdapter, LinkConfig, SpiTransport};
use panelbridge_display::{bring_up, Panel, Rotation, SSD1312_128X64};
use panelbridge_hal::embedded::EhPin;
use panelbridge_hal::BusyWaitDelay;
use panelbridge_hal_stm32f4::pins;
use panelbridge_hal_stm32f4::Stm32Spi;

mod config {
    use super::{LinkConfig, Rotation};

    include!(concat!(env!("OUT_DIR"), "/panel_config.rs"));
}

/// SPI clock for the panel
const SPI_FREQUENCY_HZ: u32 = 4_000_000;

/// Idle loop interval
const HEARTBEAT_MS: u64 = 1000;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("panelbridge firmware starting...");

    let link = config::link_config();
    if !link.is_valid() {
        error!("Invalid link config: {:?}", link);
        return;
    }

    let p = embassy_stm32::init(Default::default());

    // Setup SPI3 for the OLED (TX only, the panel never answers)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(SPI_FREQUENCY_HZ);
    let spi = Spi::new_blocking_txonly(p.SPI3, p.PC10, p.PC12, spi_config);

    info!(
        "Panel on SPI3, CS={} DC={} RESET={}",
        pins::CS,
        pins::DC,
        pins::RESET
    );
    // Control lines idle high: CS released, data mode, out of reset
    let cs = EhPin(Output::new(p.PA15, Level::High, Speed::VeryHigh));
    let dc = EhPin(Output::new(p.PD2, Level::High, Speed::VeryHigh));
    let reset = EhPin(Output::new(p.PB3, Level::High, Speed::Low));

    let gpio = GpioDelayAdapter::new(
        ControlPins::spi(cs, dc, reset),
        BusyWaitDelay::with_calibration(link.loops_per_ms),
    );
    let transport = SpiTransport::new(Stm32Spi::new(spi), &link);

    let mut panel = match Panel::setup(&SSD1312_128X64, config::ROTATION, transport, gpio) {
        Ok(panel) => panel,
        Err(e) => {
            error!("Failed to set up display: {:?}", e);
            return;
        }
    };

    match bring_up(&mut panel) {
        Ok(()) => info!("{} initialized", panel.profile().name),
        Err(e) => error!("Failed to initialize display: {:?}", e),
    }

    loop {
        Timer::after_millis(HEARTBEAT_MS).await;
    }
}
