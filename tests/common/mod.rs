//! Common test utilities for pdiff integration tests.

#![allow(dead_code)]

pub mod generators;

use pdiff::{Img, ImgVec, RGB};

/// Wraps a flat interleaved RGB buffer as an image.
pub fn to_img(rgb: &[f32], width: usize, height: usize) -> ImgVec<RGB<f32>> {
    assert_eq!(rgb.len(), width * height * 3);
    let pixels = rgb
        .chunks_exact(3)
        .map(|c| RGB::new(c[0], c[1], c[2]))
        .collect();
    Img::new(pixels, width, height)
}

/// Overwrites pixel `(x, y)` of a flat interleaved RGB buffer.
pub fn set_pixel(rgb: &mut [f32], width: usize, x: usize, y: usize, value: [f32; 3]) {
    let i = (y * width + x) * 3;
    rgb[i..i + 3].copy_from_slice(&value);
}
