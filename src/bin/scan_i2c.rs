// I2C bus scan.
//
// Releases the touch controller from reset, walks the 7-bit address
// space with empty writes, then probes the AXS5106 address explicitly.

#![no_std]
#![no_main]

use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::time::Rate;
use log::{info, warn};

use glance::board::pins;
use glance::drivers::axs5106;

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_hal::main]
fn main() -> ! {
    esp_println::logger::init_logger_from_env();
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let p = esp_hal::init(config);

    let mut delay = Delay::new();

    // pulse the touch controller's reset so it can answer the scan
    let mut tp_rst = Output::new(p.GPIO20, Level::High, OutputConfig::default());
    tp_rst.set_low();
    delay.delay_millis(10);
    tp_rst.set_high();
    delay.delay_millis(100);

    let i2c_cfg = I2cConfig::default().with_frequency(Rate::from_khz(pins::I2C_FREQ_KHZ));
    let mut i2c = I2c::new(p.I2C0, i2c_cfg)
        .unwrap()
        .with_sda(p.GPIO18)
        .with_scl(p.GPIO19);

    info!("scanning i2c bus...");
    let mut found = 0;
    for addr in 0x08..=0x77u8 {
        if i2c.write(addr, &[]).is_ok() {
            info!("device at 0x{:02x}", addr);
            found += 1;
        }
    }
    if found == 0 {
        warn!("no i2c devices detected");
    } else {
        info!("{} device(s) found", found);
    }

    match i2c.write(axs5106::I2C_ADDR, &[]) {
        Ok(()) => info!("axs5106 responded at 0x{:02x}", axs5106::I2C_ADDR),
        Err(_) => warn!("no response from 0x{:02x}", axs5106::I2C_ADDR),
    }

    loop {
        delay.delay_millis(1000);
    }
}
