//! Input validation and conversion to planar buffers.
//!
//! Every check here runs before any comparison work; after these pass the
//! rest of the pipeline has no error paths.

use imgref::ImgRef;
use rgb::RGB;

use crate::error::{PdiffError, Result};
use crate::image::{Image3F, ImageF};

/// Checks that two declared image sizes agree and are non-empty.
pub(crate) fn check_dimensions(w1: usize, h1: usize, w2: usize, h2: usize) -> Result<()> {
    if w1 != w2 || h1 != h2 {
        return Err(PdiffError::InvalidDimensions(format!(
            "image sizes differ: {w1}x{h1} vs {w2}x{h2}"
        )));
    }
    if w1 == 0 || h1 == 0 {
        return Err(PdiffError::InvalidDimensions(format!(
            "image is empty: {w1}x{h1}"
        )));
    }
    Ok(())
}

/// Checks that an interleaved buffer holds exactly `width * height` RGB pixels.
pub(crate) fn check_buffer_len(len: usize, width: usize, height: usize, which: &str) -> Result<()> {
    let expected = width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(3))
        .ok_or_else(|| {
            PdiffError::InvalidDimensions(format!("{width}x{height} overflows the address space"))
        })?;
    if len != expected {
        return Err(PdiffError::InvalidDimensions(format!(
            "{which} has {len} values, expected {expected} for {width}x{height} RGB"
        )));
    }
    Ok(())
}

#[inline]
fn check_value(index: usize, value: f32) -> Result<()> {
    // Also rejects NaN: comparisons with NaN are false
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PdiffError::InvalidPixel { index, value })
    }
}

/// Validates and splits a flat interleaved RGB buffer into planes.
pub(crate) fn planar_from_slice(rgb: &[f32], width: usize, height: usize) -> Result<Image3F> {
    let mut planes = [
        ImageF::new(width, height),
        ImageF::new(width, height),
        ImageF::new(width, height),
    ];
    for (i, px) in rgb.chunks_exact(3).enumerate() {
        for (c, &value) in px.iter().enumerate() {
            check_value(i * 3 + c, value)?;
            planes[c].data_mut()[i] = value;
        }
    }
    let [r, g, b] = planes;
    Ok(Image3F::from_planes(r, g, b))
}

/// Validates the pixels of a (possibly strided) image and splits it into planes.
///
/// Reported indices refer to the logical interleaved layout, ignoring stride.
pub(crate) fn planar_from_imgref(img: ImgRef<'_, RGB<f32>>) -> Result<Image3F> {
    let width = img.width();
    for (y, row) in img.rows().enumerate() {
        for (x, px) in row.iter().enumerate() {
            let base = (y * width + x) * 3;
            check_value(base, px.r)?;
            check_value(base + 1, px.g)?;
            check_value(base + 2, px.b)?;
        }
    }
    Ok(Image3F::from_imgref(img))
}
