//! AXS5106 capacitive touch controller driver
//!
//! Register interface on I2C at 0x63. The controller holds its INT
//! line low while a contact is present; register reads outside that
//! window return stale coordinates, so poll() only touches the bus
//! when INT is asserted. Coordinates are 12-bit with event flags in
//! the high nibble, clamped here to the panel's visible area.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::i2c::I2c;
use esp_hal::delay::Delay;
use glance_ui::engine::{PointerEvent, PointerPhase, PointerSource};

use super::jd9853::{HEIGHT, WIDTH};

pub const I2C_ADDR: u8 = 0x63;

mod reg {
    /// Start of the touch record: gesture, point count, x, y.
    pub const GESTURE: u8 = 0x01;
}

pub struct Axs5106<I2C, RST, INT> {
    i2c: I2C,
    rst: RST,
    int: INT,
    // last reported position, replayed on release
    last: (u16, u16),
    down: bool,
}

impl<I2C, RST, INT, E> Axs5106<I2C, RST, INT>
where
    I2C: I2c<Error = E>,
    RST: OutputPin,
    INT: InputPin,
{
    pub fn new(i2c: I2C, rst: RST, int: INT) -> Self {
        Self {
            i2c,
            rst,
            int,
            last: (0, 0),
            down: false,
        }
    }

    /// Hardware reset pulse; the controller needs ~100ms to come up.
    pub fn init(&mut self, delay: &mut Delay) {
        let _ = self.rst.set_low();
        delay.delay_millis(10);
        let _ = self.rst.set_high();
        delay.delay_millis(100);
    }

    fn read_point(&mut self) -> Result<Option<(u16, u16)>, E> {
        let mut buf = [0u8; 6];
        self.i2c.write_read(I2C_ADDR, &[reg::GESTURE], &mut buf)?;

        let points = buf[1] & 0x0F;
        if points == 0 {
            return Ok(None);
        }

        let x = (((buf[2] & 0x0F) as u16) << 8) | buf[3] as u16;
        let y = (((buf[4] & 0x0F) as u16) << 8) | buf[5] as u16;
        Ok(Some((x.min(WIDTH - 1), y.min(HEIGHT - 1))))
    }
}

impl<I2C, RST, INT, E> PointerSource for Axs5106<I2C, RST, INT>
where
    I2C: I2c<Error = E>,
    RST: OutputPin,
    INT: InputPin,
{
    type Error = E;

    fn poll(&mut self) -> Result<Option<PointerEvent>, Self::Error> {
        if self.int.is_low().unwrap_or(false)
            && let Some((x, y)) = self.read_point()?
        {
            let phase = if self.down {
                PointerPhase::Move
            } else {
                PointerPhase::Down
            };
            self.down = true;
            self.last = (x, y);
            return Ok(Some(PointerEvent { x, y, phase }));
        }

        if self.down {
            self.down = false;
            let (x, y) = self.last;
            return Ok(Some(PointerEvent {
                x,
                y,
                phase: PointerPhase::Up,
            }));
        }

        Ok(None)
    }
}
