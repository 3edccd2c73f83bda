//! Box-filter downsampling.
//!
//! Averaging `k x k` blocks before comparison removes sub-block noise such
//! as antialiasing jitter between two otherwise equivalent renders. Blocks
//! on the right and bottom edges may be partial and are averaged over the
//! pixels they actually cover.

use crate::image::{Image3F, ImageF};

/// Output dimensions for a downsample factor.
///
/// Factors 0 and 1 leave the size unchanged.
#[must_use]
pub fn downsampled_size(width: usize, height: usize, factor: usize) -> (usize, usize) {
    if factor <= 1 {
        (width, height)
    } else {
        (width.div_ceil(factor), height.div_ceil(factor))
    }
}

/// Averages non-overlapping `factor x factor` blocks of one plane.
#[must_use]
pub fn downsample_plane(input: &ImageF, factor: usize) -> ImageF {
    if factor <= 1 {
        return input.clone();
    }

    let (width, height) = (input.width(), input.height());
    let (out_width, out_height) = downsampled_size(width, height, factor);
    let mut output = ImageF::new(out_width, out_height);

    for oy in 0..out_height {
        let y0 = oy * factor;
        let y1 = (y0 + factor).min(height);
        let out_row = output.row_mut(oy);
        for (ox, out) in out_row.iter_mut().enumerate() {
            let x0 = ox * factor;
            let x1 = (x0 + factor).min(width);
            let mut sum = 0.0f32;
            for y in y0..y1 {
                sum += input.row(y)[x0..x1].iter().sum::<f32>();
            }
            *out = sum / ((x1 - x0) * (y1 - y0)) as f32;
        }
    }

    output
}

/// Downsamples all three planes of an image.
#[must_use]
pub fn downsample(input: &Image3F, factor: usize) -> Image3F {
    if factor <= 1 {
        return input.clone();
    }
    Image3F::from_planes(
        downsample_plane(input.plane(0), factor),
        downsample_plane(input.plane(1), factor),
        downsample_plane(input.plane(2), factor),
    )
}
