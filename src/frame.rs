use crate::OutputDriver;
use crate::color::{BLACK, Rgb};
use crate::topology::{LightChannel, LightRegion, LightsConfig};

/// Pixel buffer for every channel of the strip
pub struct Frame<const N: usize> {
    pixels: [Rgb; N],
}

impl<const N: usize> Frame<N> {
    pub const fn new() -> Self {
        Self { pixels: [BLACK; N] }
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }

    /// Write every channel slice to the driver, in layout order
    pub fn flush<D: OutputDriver>(&self, channels: &[LightChannel], driver: &mut D) {
        let mut offset = 0;
        for channel in channels {
            let end = (offset + channel.leds as usize).min(N);
            if let Some(colors) = self.pixels.get(offset..end) {
                driver.write(channel.channel, colors);
            }
            offset = end;
        }
    }
}

impl<const N: usize> Default for Frame<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Paint every pixel of a region
pub fn fill_region(pixels: &mut [Rgb], lights: &LightsConfig, region: &LightRegion, color: Rgb) {
    for index in region.pixels(lights) {
        if let Some(pixel) = pixels.get_mut(index) {
            *pixel = color;
        }
    }
}
