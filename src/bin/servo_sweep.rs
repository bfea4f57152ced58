// Servo sweep on the header pin.
//
// 50 Hz LEDC frame, 10-bit duty; the pulse width walks the servo's
// usable window back and forth in 10 ms steps. The display stays
// uninitialized — GPIO1 doubles as the LCD clock.

#![no_std]
#![no_main]

use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use esp_hal::gpio::DriveMode;
use esp_hal::ledc::channel::ChannelIFace;
use esp_hal::ledc::timer::TimerIFace;
use esp_hal::ledc::{LSGlobalClkSource, Ledc, LowSpeed, channel, timer};
use esp_hal::time::Rate;
use log::info;

use glance::drivers::servo::{FRAME_HZ, MAX_PULSE_US, MIN_PULSE_US, Servo};

esp_bootloader_esp_idf::esp_app_desc!();

const STEP_US: usize = 20;
const STEP_DELAY_MS: u32 = 10;

#[esp_hal::main]
fn main() -> ! {
    esp_println::logger::init_logger_from_env();
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let p = esp_hal::init(config);

    let mut delay = Delay::new();

    let mut ledc = Ledc::new(p.LEDC);
    ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

    let mut lstimer0 = ledc.timer::<LowSpeed>(timer::Number::Timer0);
    lstimer0
        .configure(timer::config::Config {
            duty: timer::config::Duty::Duty10Bit,
            clock_source: timer::LSClockSource::APBClk,
            frequency: Rate::from_hz(FRAME_HZ),
        })
        .unwrap();

    let mut channel0 = ledc.channel(channel::Number::Channel0, p.GPIO1);
    channel0
        .configure(channel::config::Config {
            timer: &lstimer0,
            duty_pct: 0,
            drive_mode: DriveMode::PushPull,
        })
        .unwrap();

    let mut servo = Servo::new(channel0);
    info!("servo ready, sweeping...");

    // back and forth
    loop {
        for us in (MIN_PULSE_US..=MAX_PULSE_US).rev().step_by(STEP_US) {
            servo.set_pulse_us(us).unwrap();
            delay.delay_millis(STEP_DELAY_MS);
        }
        for us in (MIN_PULSE_US..=MAX_PULSE_US).step_by(STEP_US) {
            servo.set_pulse_us(us).unwrap();
            delay.delay_millis(STEP_DELAY_MS);
        }
    }
}
