// Touch input on top of the display.
//
// Same LCD bringup as the shapes demo, plus the AXS5106 driver as the
// engine's pointer source. Touches are logged; a tapped square renders
// inverted while the finger is down.

#![no_std]
#![no_main]

use core::sync::atomic::AtomicBool;

use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use log::info;

use embedded_graphics::prelude::*;

use glance::board::{Board, HalClock};
use glance::drivers::jd9853::{HEIGHT, WIDTH};
use glance_ui::{Alignment, BoxStyle, Pump, Scene, Ui, rgb};

esp_bootloader_esp_idf::esp_app_desc!();

static STOP: AtomicBool = AtomicBool::new(false);

// finger-sized targets
const PAD: u32 = 32;

fn pad(bg: u32) -> BoxStyle {
    BoxStyle {
        bg: rgb(bg),
        border: rgb(0xffffff),
        border_width: 1,
        radius: 4,
    }
}

#[esp_hal::main]
fn main() -> ! {
    esp_println::logger::init_logger_from_env();
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let p = esp_hal::init(config);

    info!("booting...");

    let mut delay = Delay::new();
    let board = Board::init(p);

    let mut lcd = board.display.lcd;
    lcd.init(&mut delay).unwrap();
    info!("display initialized.");

    let mut touch = board.touch.touch;
    touch.init(&mut delay);
    info!("touch controller reset.");

    let mut scene = Scene::new(Size::new(WIDTH as u32, HEIGHT as u32), rgb(0x000000));
    scene.add_label("tap the squares", rgb(0xffffff), Alignment::Center, 0, 0);
    scene.add_box(pad(0x00aa00), PAD, PAD, Alignment::TopLeft, 8, 8);
    scene.add_box(pad(0xaa0000), PAD, PAD, Alignment::TopRight, -8, 8);
    scene.add_box(pad(0xaa00aa), PAD, PAD, Alignment::BottomRight, -8, -8);
    scene.add_box(pad(0x0000aa), PAD, PAD, Alignment::BottomLeft, 8, -8);

    let mut ui = Ui::new(lcd, touch, scene);
    ui.invalidate();
    info!("ui ready.");

    let mut pump = Pump::new(HalClock::new(), ui);
    if let Err(e) = pump.run(&STOP) {
        panic!("ui loop failed: {e}");
    }
    unreachable!("ui loop stopped without a stop request");
}
