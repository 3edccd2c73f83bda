//! Per-pixel decision engine.
//!
//! This module ties together all the stages: downsampling, colour
//! conversion, the luminance pyramid and the psychophysical model, and
//! produces the difference mask.
//!
//! A pixel fails when its luminance difference exceeds the TVI threshold
//! elevated by the contrast/masking factor, or, outside luminance-only
//! mode, when its squared a*b* distance (scaled by the colour factor)
//! exceeds that same factor.

use imgref::ImgVec;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::color::{to_perceptual, PerceptualImage};
use crate::consts::{MIN_LUMINANCE, NUM_BANDS, SCOTOPIC_LUMINANCE};
use crate::downsample::{downsample, downsampled_size};
use crate::image::Image3F;
use crate::psycho::{tvi, ViewingModel};
use crate::pyramid::LuminancePyramid;
use crate::{PdiffConfig, PdiffResult};

/// One image carried through every per-image stage.
#[derive(Debug, Clone)]
pub(crate) struct PreparedImage {
    /// Downsampled linear RGB, kept for the identical-input shortcut.
    rgb: Image3F,
    perceptual: PerceptualImage,
    pyramid: LuminancePyramid,
}

impl PreparedImage {
    /// Runs downsampling, colour conversion and pyramid construction.
    pub(crate) fn new(rgb: &Image3F, config: &PdiffConfig) -> Self {
        Self::from_downsampled(downsample(rgb, config.down_sample()), config)
    }

    pub(crate) fn from_downsampled(rgb: Image3F, config: &PdiffConfig) -> Self {
        let perceptual = to_perceptual(&rgb, config.gamma(), config.peak_luminance());
        let pyramid = LuminancePyramid::new(&perceptual.luminance);
        Self {
            rgb,
            perceptual,
            pyramid,
        }
    }

    pub(crate) fn rgb(&self) -> &Image3F {
        &self.rgb
    }

    pub(crate) fn width(&self) -> usize {
        self.rgb.width()
    }

    pub(crate) fn height(&self) -> usize {
        self.rgb.height()
    }
}

/// Result with every pixel passing.
pub(crate) fn identical_result(width: usize, height: usize) -> PdiffResult {
    PdiffResult {
        pixels_failed: 0,
        mask: ImgVec::new(vec![false; width * height], width, height),
    }
}

/// Compares two validated, equally sized linear RGB images.
pub(crate) fn compare_images(a: &Image3F, b: &Image3F, config: &PdiffConfig) -> PdiffResult {
    debug_assert!(a.plane(0).same_size(b.plane(0)));

    if a == b {
        let (width, height) = downsampled_size(a.width(), a.height(), config.down_sample());
        debug!(width, height, "inputs are identical");
        return identical_result(width, height);
    }

    let prepared_a = PreparedImage::new(a, config);
    let prepared_b = PreparedImage::new(b, config);
    compare_prepared(&prepared_a, &prepared_b, config)
}

/// Compares two prepared images of identical size.
pub(crate) fn compare_prepared(
    a: &PreparedImage,
    b: &PreparedImage,
    config: &PdiffConfig,
) -> PdiffResult {
    let (width, height) = (a.width(), a.height());
    let model = ViewingModel::new(width, config.field_of_view());
    debug!(
        width,
        height,
        one_degree_pixels = model.one_degree_pixels(),
        pixels_per_degree = model.pixels_per_degree(),
        adaptation_level = model.adaptation_level(),
        luminance_only = config.luminance_only(),
        "comparing images"
    );

    let mut mask = vec![false; width * height];
    let row_test = |(y, row): (usize, &mut [bool])| decide_row(y, a, b, &model, config, row);

    #[cfg(feature = "parallel")]
    let pixels_failed: usize = mask.par_chunks_mut(width).enumerate().map(row_test).sum();

    #[cfg(not(feature = "parallel"))]
    let pixels_failed: usize = mask.chunks_mut(width).enumerate().map(row_test).sum();

    debug!(pixels_failed, total = width * height, "comparison finished");

    PdiffResult {
        pixels_failed,
        mask: ImgVec::new(mask, width, height),
    }
}

/// Decides every pixel of row `y`; returns how many failed.
fn decide_row(
    y: usize,
    a: &PreparedImage,
    b: &PreparedImage,
    model: &ViewingModel,
    config: &PdiffConfig,
    out: &mut [bool],
) -> usize {
    let la = a.pyramid.rows(y);
    let lb = b.pyramid.rows(y);
    let (row_a_a, row_a_b) = (a.perceptual.a.row(y), a.perceptual.b.row(y));
    let (row_b_a, row_b_b) = (b.perceptual.a.row(y), b.perceptual.b.row(y));
    let level = model.adaptation_level();

    let mut failed = 0;
    for (x, different) in out.iter_mut().enumerate() {
        // Band-pass contrast of each band, normalized by the coarser level
        let mut contrast = [0.0f32; NUM_BANDS];
        for (band, c) in contrast.iter_mut().enumerate() {
            let n1 = (la[band][x] - la[band + 1][x]).abs();
            let n2 = (lb[band][x] - lb[band + 1][x]).abs();
            let d1 = la[band + 2][x].abs();
            let d2 = lb[band + 2][x].abs();
            *c = n1.max(n2) / d1.max(d2).max(MIN_LUMINANCE);
        }

        let adapt = (0.5 * (la[level][x] + lb[level][x])).max(MIN_LUMINANCE);
        let factor = model.elevation_factor(&contrast, adapt);

        let delta = (la[0][x] - lb[0][x]).abs();
        *different = if delta > factor * tvi(adapt) {
            true
        } else if config.luminance_only() {
            false
        } else {
            // Cones don't discriminate colour in scotopic conditions
            let color_scale = if adapt < SCOTOPIC_LUMINANCE {
                0.0
            } else {
                config.color_factor()
            };
            let da = row_a_a[x] - row_b_a[x];
            let db = row_a_b[x] - row_b_b[x];
            (da * da + db * db) * color_scale > factor
        };

        failed += usize::from(*different);
    }
    failed
}
