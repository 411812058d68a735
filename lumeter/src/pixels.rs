// src/pixels.rs
use micro_strip::{PixelSink, OFF, RGB8};
use smart_leds::{brightness, gamma, SmartLedsWrite};

use crate::config::LED_BRIGHTNESS;

/// One WS2812 ring behind the pixel sink seam.
///
/// Colors are staged in a fixed buffer and only leave the chip on
/// `show`, with gamma correction and the global brightness cap applied
/// on the way out.
pub struct Ws2812Ring<D, const N: usize> {
    driver: D,
    pixels: [RGB8; N],
}

impl<D, const N: usize> Ws2812Ring<D, N>
where
    D: SmartLedsWrite<Color = RGB8>,
{
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            pixels: [OFF; N],
        }
    }
}

impl<D, const N: usize> PixelSink for Ws2812Ring<D, N>
where
    D: SmartLedsWrite<Color = RGB8>,
{
    type Error = D::Error;

    fn len(&self) -> usize {
        N
    }

    fn set(&mut self, index: usize, color: RGB8) {
        self.pixels[index] = color;
    }

    fn fill(&mut self, color: RGB8) {
        self.pixels = [color; N];
    }

    fn show(&mut self) -> Result<(), Self::Error> {
        self.driver
            .write(brightness(gamma(self.pixels.iter().copied()), LED_BRIGHTNESS))
    }
}
