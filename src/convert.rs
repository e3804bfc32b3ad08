//! Color conversion.

use imgref::ImgVec;

use crate::pixel::{GrayImage, RgbImage};

/// Reduce an RGB image to grayscale.
///
/// Each output intensity is the truncating integer average of the three
/// channels, `(r + g + b) / 3`. Width, height, and scale carry over
/// unchanged. Pure and infallible.
pub fn rgb_to_grayscale(image: &RgbImage) -> GrayImage {
    let buf = image
        .pixels
        .buf()
        .iter()
        .map(|px| ((px.r as u32 + px.g as u32 + px.b as u32) / 3) as u16)
        .collect();
    GrayImage {
        pixels: ImgVec::new(buf, image.width(), image.height()),
        scale: image.scale,
    }
}
