// RGB565 framebuffer test double shared by the scene and engine tests.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

pub struct Canvas {
    width: u32,
    height: u32,
    px: Vec<Rgb565>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            px: vec![Rgb565::BLACK; (width * height) as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Rgb565 {
        self.px[(y * self.width + x) as usize]
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height {
                self.px[(p.y as u32 * self.width + p.x as u32) as usize] = color;
            }
        }
        Ok(())
    }
}
