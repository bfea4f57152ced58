//! JD9853 LCD driver for the 1.47" 172x320 panel
//!
//! The command set follows the ST7789 family. The panel maps its 172
//! visible columns starting at controller column 34 and needs
//! inversion on to match the glass.
use embedded_graphics_core::Pixel;
use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{Dimensions, OriginDimensions, Size};
use embedded_graphics_core::pixelcolor::Rgb565;
use embedded_graphics_core::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics_core::primitives::{PointsIter, Rectangle};
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;
use esp_hal::delay::Delay;

// Display dimensions (visible area)
pub const WIDTH: u16 = 172;
pub const HEIGHT: u16 = 320;

// Panel offset into controller RAM
pub const OFFSET_X: u16 = 34;
pub const OFFSET_Y: u16 = 0;

// SPI frequency
pub const SPI_FREQ_MHZ: u32 = 40;

// JD9853 commands (ST7789-compatible subset)
mod cmd {
    pub const SW_RESET: u8 = 0x01;
    pub const SLEEP_OUT: u8 = 0x11;
    pub const NORMAL_MODE: u8 = 0x13;
    pub const INVERSION_ON: u8 = 0x21;
    pub const DISPLAY_ON: u8 = 0x29;
    pub const COLUMN_ADDR: u8 = 0x2A;
    pub const ROW_ADDR: u8 = 0x2B;
    pub const MEMORY_WRITE: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const PIXEL_FORMAT: u8 = 0x3A;
}

// MADCTL: panel wiring is BGR
const MADCTL_BGR: u8 = 0x08;
// COLMOD: 16 bpp RGB565
const COLMOD_16BPP: u8 = 0x05;

// Streaming chunk: 128 pixels per SPI transfer
const CHUNK_PX: usize = 128;

// Write-only SPI driver; pixels are streamed into the controller's RAM
// through a window set per draw call, no framebuffer on our side.
pub struct Jd9853<SPI, DC, RST, BL> {
    spi: SPI,
    dc: DC,
    rst: RST,
    bl: BL,
    init_done: bool,
}

impl<SPI, DC, RST, BL, E> Jd9853<SPI, DC, RST, BL>
where
    SPI: SpiDevice<Error = E>,
    DC: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
{
    pub fn new(spi: SPI, dc: DC, rst: RST, bl: BL) -> Self {
        Self {
            spi,
            dc,
            rst,
            bl,
            init_done: false,
        }
    }

    pub fn reset(&mut self, delay: &mut Delay) {
        let _ = self.rst.set_high();
        delay.delay_millis(10);
        let _ = self.rst.set_low();
        delay.delay_millis(10);
        let _ = self.rst.set_high();
        delay.delay_millis(120);
    }

    /// Hardware reset, init sequence, backlight on.
    pub fn init(&mut self, delay: &mut Delay) -> Result<(), E> {
        self.reset(delay);

        self.send_command(cmd::SW_RESET)?;
        delay.delay_millis(120);

        self.send_command(cmd::SLEEP_OUT)?;
        delay.delay_millis(120);

        self.send_command(cmd::MADCTL)?;
        self.send_data(&[MADCTL_BGR])?;

        self.send_command(cmd::PIXEL_FORMAT)?;
        self.send_data(&[COLMOD_16BPP])?;

        self.send_command(cmd::INVERSION_ON)?;
        self.send_command(cmd::NORMAL_MODE)?;

        self.send_command(cmd::DISPLAY_ON)?;
        delay.delay_millis(20);

        self.init_done = true;
        self.backlight(true);
        Ok(())
    }

    pub fn backlight(&mut self, on: bool) {
        let _ = if on {
            self.bl.set_high()
        } else {
            self.bl.set_low()
        };
    }

    pub fn is_initialized(&self) -> bool {
        self.init_done
    }

    /// Fill the whole panel with one color.
    pub fn clear(&mut self, color: Rgb565) -> Result<(), E> {
        self.fill_rect(0, 0, WIDTH, HEIGHT, color)
    }

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) -> Result<(), E> {
        if w == 0 || h == 0 {
            return Ok(());
        }
        self.set_window(x, y, x + w - 1, y + h - 1)?;

        let raw = RawU16::from(color).into_inner().to_be_bytes();
        let mut chunk = [0u8; CHUNK_PX * 2];
        for px in chunk.chunks_exact_mut(2) {
            px.copy_from_slice(&raw);
        }

        let mut remaining = w as usize * h as usize;
        while remaining > 0 {
            let n = remaining.min(CHUNK_PX);
            self.send_data(&chunk[..n * 2])?;
            remaining -= n;
        }
        Ok(())
    }

    // Address window in panel coordinates; leaves the controller ready
    // for MEMORY_WRITE data.
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), E> {
        let (x0, x1) = (x0 + OFFSET_X, x1 + OFFSET_X);
        let (y0, y1) = (y0 + OFFSET_Y, y1 + OFFSET_Y);

        self.send_command(cmd::COLUMN_ADDR)?;
        self.send_data(&[
            (x0 >> 8) as u8,
            (x0 & 0xFF) as u8,
            (x1 >> 8) as u8,
            (x1 & 0xFF) as u8,
        ])?;

        self.send_command(cmd::ROW_ADDR)?;
        self.send_data(&[
            (y0 >> 8) as u8,
            (y0 & 0xFF) as u8,
            (y1 >> 8) as u8,
            (y1 & 0xFF) as u8,
        ])?;

        self.send_command(cmd::MEMORY_WRITE)
    }

    fn send_command(&mut self, cmd: u8) -> Result<(), E> {
        let _ = self.dc.set_low();
        let result = self.spi.write(&[cmd]);
        let _ = self.dc.set_high();
        result
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), E> {
        let _ = self.dc.set_high();
        self.spi.write(data)
    }
}

// embedded-graphics integration: the driver is the draw target.

impl<SPI, DC, RST, BL, E> OriginDimensions for Jd9853<SPI, DC, RST, BL>
where
    SPI: SpiDevice<Error = E>,
    DC: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
{
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<SPI, DC, RST, BL, E> DrawTarget for Jd9853<SPI, DC, RST, BL>
where
    SPI: SpiDevice<Error = E>,
    DC: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
{
    type Color = Rgb565;
    type Error = E;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if p.x < 0 || p.y < 0 || p.x >= WIDTH as i32 || p.y >= HEIGHT as i32 {
                continue;
            }
            let (x, y) = (p.x as u16, p.y as u16);
            self.set_window(x, y, x, y)?;
            self.send_data(&RawU16::from(color).into_inner().to_be_bytes())?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let Some(area) = clipped(area, &self.bounding_box()) else {
            return Ok(());
        };
        self.fill_rect(
            area.top_left.x as u16,
            area.top_left.y as u16,
            area.size.width as u16,
            area.size.height as u16,
            color,
        )
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // the streamed window only works when nothing gets clipped;
        // otherwise fall back to per-pixel writes
        if clipped(area, &self.bounding_box()) != Some(*area) {
            return self.draw_iter(
                area.points()
                    .zip(colors)
                    .map(|(p, c)| Pixel(p, c)),
            );
        }

        let x0 = area.top_left.x as u16;
        let y0 = area.top_left.y as u16;
        self.set_window(
            x0,
            y0,
            x0 + area.size.width as u16 - 1,
            y0 + area.size.height as u16 - 1,
        )?;

        let mut chunk = [0u8; CHUNK_PX * 2];
        let mut filled = 0;
        for color in colors {
            chunk[filled..filled + 2]
                .copy_from_slice(&RawU16::from(color).into_inner().to_be_bytes());
            filled += 2;
            if filled == chunk.len() {
                self.send_data(&chunk)?;
                filled = 0;
            }
        }
        if filled > 0 {
            self.send_data(&chunk[..filled])?;
        }
        Ok(())
    }
}

fn clipped(area: &Rectangle, bounds: &Rectangle) -> Option<Rectangle> {
    let i = area.intersection(bounds);
    if i.size.width == 0 || i.size.height == 0 {
        None
    } else {
        Some(i)
    }
}
