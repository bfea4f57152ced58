// LCD bringup plus a static scene: a centered label, four corner
// squares (one blinking) and a bordered circle, rendered through the
// scene engine and driven forever by the refresh pump.

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
use glance_ui::{Alignment, BoxStyle, NoPointer, Pump, Scene, Ui, rgb};

esp_bootloader_esp_idf::esp_app_desc!();

static STOP: AtomicBool = AtomicBool::new(false);

const BLINK_MS: u32 = 500;

fn square(bg: u32) -> BoxStyle {
    BoxStyle {
        bg: rgb(bg),
        border: rgb(0xffffff),
        border_width: 1,
        radius: 0,
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

    let mut scene = Scene::new(Size::new(WIDTH as u32, HEIGHT as u32), rgb(0xff0000));

    scene.add_label("HELLO", rgb(0xffffff), Alignment::Center, 0, 30);

    let blinker = scene
        .add_box(square(0x00aa00), 10, 10, Alignment::TopLeft, 0, 0)
        .unwrap();
    scene.add_box(square(0xaa0000), 10, 10, Alignment::TopRight, 0, 0);
    scene.add_box(square(0xaa00aa), 10, 10, Alignment::BottomRight, 0, 0);
    scene.add_box(square(0x0000aa), 10, 10, Alignment::BottomLeft, 0, 0);

    scene.add_box(
        BoxStyle {
            bg: rgb(0x0000ff),
            border: rgb(0xff00ff),
            border_width: 3,
            radius: 25,
        },
        50,
        50,
        Alignment::Center,
        0,
        -10,
    );

    let mut ui = Ui::new(lcd, NoPointer, scene);
    ui.invalidate();
    ui.every(BLINK_MS, blinker);
    info!("ui ready.");

    let mut pump = Pump::new(HalClock::new(), ui);
    if let Err(e) = pump.run(&STOP) {
        panic!("ui loop failed: {e}");
    }
    unreachable!("ui loop stopped without a stop request");
}
