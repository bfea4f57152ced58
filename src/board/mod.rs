//! Board Support Package for the ESP32-C6 1.47" touch-LCD module
//!
//! Maps physical hardware to named subsystems so that demo code
//! doesn't need to know GPIO numbers or peripheral details. The servo
//! header is deliberately not part of [`Board`]: it shares a pin with
//! the LCD clock and is only brought up by the standalone sweep demo.

pub mod clock;
pub mod pins;

pub use clock::HalClock;

use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::{
    Blocking,
    delay::Delay,
    gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull},
    i2c,
    peripherals::Peripherals,
    spi,
    time::Rate,
};

use crate::drivers::axs5106::Axs5106;
use crate::drivers::jd9853::{self, Jd9853};

// Type Aliases
pub type SpiBus = spi::master::Spi<'static, Blocking>;
pub type SpiDev = ExclusiveDevice<SpiBus, Output<'static>, Delay>;
pub type Lcd = Jd9853<SpiDev, Output<'static>, Output<'static>, Output<'static>>;
pub type I2cBus = i2c::master::I2c<'static, Blocking>;
pub type Touch = Axs5106<I2cBus, Output<'static>, Input<'static>>;

/// Display subsystem hardware: LCD driver, not yet initialized.
pub struct DisplayHw {
    pub lcd: Lcd,
}

/// Touch subsystem hardware: touch driver, not yet reset.
pub struct TouchHw {
    pub touch: Touch,
}

/// Complete board hardware, ready for driver initialization.
pub struct Board {
    pub display: DisplayHw,
    pub touch: TouchHw,
}

impl Board {
    pub fn init(p: Peripherals) -> Self {
        let touch = Self::init_touch(&p);
        let display = Self::init_display(p);
        Board { display, touch }
    }

    fn init_touch(p: &Peripherals) -> TouchHw {
        let i2c_cfg =
            i2c::master::Config::default().with_frequency(Rate::from_khz(pins::I2C_FREQ_KHZ));
        let i2c = i2c::master::I2c::new(unsafe { p.I2C0.clone_unchecked() }, i2c_cfg)
            .unwrap()
            .with_sda(unsafe { p.GPIO18.clone_unchecked() })
            .with_scl(unsafe { p.GPIO19.clone_unchecked() });

        let rst = Output::new(
            unsafe { p.GPIO20.clone_unchecked() },
            Level::High,
            OutputConfig::default(),
        );
        let int = Input::new(
            unsafe { p.GPIO21.clone_unchecked() },
            InputConfig::default().with_pull(Pull::Up),
        );

        TouchHw {
            touch: Axs5106::new(i2c, rst, int),
        }
    }

    fn init_display(p: Peripherals) -> DisplayHw {
        // GPIO setup
        let cs = Output::new(p.GPIO14, Level::High, OutputConfig::default());
        let dc = Output::new(p.GPIO15, Level::High, OutputConfig::default());
        let rst = Output::new(p.GPIO22, Level::High, OutputConfig::default());
        let bl = Output::new(p.GPIO23, Level::Low, OutputConfig::default());

        // SPI bus
        let spi_cfg = spi::master::Config::default()
            .with_frequency(Rate::from_mhz(jd9853::SPI_FREQ_MHZ));
        let spi_bus = spi::master::Spi::new(p.SPI2, spi_cfg)
            .unwrap()
            .with_sck(p.GPIO1)
            .with_mosi(p.GPIO2);

        let spi_dev = ExclusiveDevice::new(spi_bus, cs, Delay::new()).unwrap();

        DisplayHw {
            lcd: Jd9853::new(spi_dev, dc, rst, bl),
        }
    }
}
