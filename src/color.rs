//! Colour space conversion: linear RGB → XYZ → CIE L*a*b*.
//!
//! Each channel first goes through the display response `c^gamma`, then the
//! Adobe RGB (1998) primaries matrix. L*a*b* is taken relative to the white
//! of a display whose full-scale output is `peak_luminance`, which is
//! `XYZ(1, 1, 1)` in the normalized space. The luminance handed to the
//! contrast stage is `Y * peak_luminance` in cd/m².

use std::sync::LazyLock;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::consts::{ADOBE_RGB_TO_XYZ, LAB_EPSILON, LAB_KAPPA, MAX_LUMINANCE, MAX_RESPONSE};
use crate::image::{Image3F, ImageF};

/// XYZ of full-scale white, computed once.
static REFERENCE_WHITE: LazyLock<[f32; 3]> = LazyLock::new(|| rgb_to_xyz(1.0, 1.0, 1.0));

/// Perceptual planes of one image.
#[derive(Debug, Clone, PartialEq)]
pub struct PerceptualImage {
    /// Luminance in cd/m².
    pub luminance: ImageF,
    /// CIE a* (green–red opponent axis).
    pub a: ImageF,
    /// CIE b* (blue–yellow opponent axis).
    pub b: ImageF,
}

/// Converts linear RGB to CIE XYZ.
#[inline]
#[must_use]
pub fn rgb_to_xyz(r: f32, g: f32, b: f32) -> [f32; 3] {
    let m = &ADOBE_RGB_TO_XYZ;
    [
        m[0] * r + m[1] * g + m[2] * b,
        m[3] * r + m[4] * g + m[5] * b,
        m[6] * r + m[7] * g + m[8] * b,
    ]
}

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        (LAB_KAPPA * t + 16.0) / 116.0
    }
}

/// Converts CIE XYZ to L*a*b* relative to full-scale white.
#[inline]
#[must_use]
pub fn xyz_to_lab(xyz: [f32; 3]) -> [f32; 3] {
    let white = &*REFERENCE_WHITE;
    let fx = lab_f(xyz[0] / white[0]);
    let fy = lab_f(xyz[1] / white[1]);
    let fz = lab_f(xyz[2] / white[2]);
    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

fn convert_row(
    rgb: &Image3F,
    y: usize,
    gamma: f32,
    peak_luminance: f32,
    (lum_row, (a_row, b_row)): (&mut [f32], (&mut [f32], &mut [f32])),
) {
    let row_r = rgb.plane(0).row(y);
    let row_g = rgb.plane(1).row(y);
    let row_b = rgb.plane(2).row(y);

    // Huge finite radiances overflow powf; min() maps inf back into range
    let response = |c: f32| c.powf(gamma).min(MAX_RESPONSE);

    for x in 0..lum_row.len() {
        let xyz = rgb_to_xyz(response(row_r[x]), response(row_g[x]), response(row_b[x]));
        let [_, a, b] = xyz_to_lab(xyz);
        lum_row[x] = (xyz[1] * peak_luminance).min(MAX_LUMINANCE);
        a_row[x] = a;
        b_row[x] = b;
    }
}

/// Converts a linear RGB image into luminance and chromatic planes.
#[must_use]
pub fn to_perceptual(rgb: &Image3F, gamma: f32, peak_luminance: f32) -> PerceptualImage {
    let (width, height) = (rgb.width(), rgb.height());
    let mut luminance = ImageF::new(width, height);
    let mut a = ImageF::new(width, height);
    let mut b = ImageF::new(width, height);

    #[cfg(feature = "parallel")]
    luminance
        .data_mut()
        .par_chunks_mut(width)
        .zip(
            a.data_mut()
                .par_chunks_mut(width)
                .zip(b.data_mut().par_chunks_mut(width)),
        )
        .enumerate()
        .for_each(|(y, rows)| convert_row(rgb, y, gamma, peak_luminance, rows));

    #[cfg(not(feature = "parallel"))]
    luminance
        .data_mut()
        .chunks_mut(width)
        .zip(a.data_mut().chunks_mut(width).zip(b.data_mut().chunks_mut(width)))
        .enumerate()
        .for_each(|(y, rows)| convert_row(rgb, y, gamma, peak_luminance, rows));

    PerceptualImage { luminance, a, b }
}
