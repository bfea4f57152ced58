//! GPIO |    Function    |      Notes
//! -----+----------------+----------------------------------
//!  1   | SPI2 SCK       | LCD clock; also broken out on the header
//!  2   | SPI2 MOSI      | LCD data out
//!  5   | SPI2 MISO      | Unused — the LCD is write-only
//! 14   | LCD CS         | Display chip select
//! 15   | LCD DC         | Data/Command select
//! 22   | LCD RST        | Reset (active low)
//! 23   | LCD BL         | Backlight (active high)
//! 18   | I2C0 SDA       | Touch controller data
//! 19   | I2C0 SCL       | Touch controller clock
//! 20   | TP RST         | Touch reset (active low)
//! 21   | TP INT         | Low while a contact is present

// ----- LCD (SPI) -----
pub const LCD_CS: u8 = 14;
pub const LCD_DC: u8 = 15;
pub const LCD_RST: u8 = 22;
pub const LCD_BL: u8 = 23;

// ----- SPI Bus -----
pub const SPI_SCK: u8 = 1;
pub const SPI_MOSI: u8 = 2;
pub const SPI_MISO: u8 = 5; // not wired to the panel

// ----- Touch (I2C) -----
pub const TP_SDA: u8 = 18;
pub const TP_SCL: u8 = 19;
pub const TP_RST: u8 = 20;
pub const TP_INT: u8 = 21;

pub const I2C_FREQ_KHZ: u32 = 400;

// ----- Servo header -----
// Shares GPIO1 with the LCD clock; the sweep demo assumes the display
// is left uninitialized.
pub const SERVO_PWM: u8 = 1;
