//! Multi-scale decomposition of the luminance plane.
//!
//! Level 0 is the luminance itself; each following level is the previous
//! one low-passed by the 5-tap kernel. Levels keep full resolution, so the
//! effective kernel width doubles roughly every level. The difference of
//! two adjacent levels is a band-pass (Laplacian) band whose centre
//! frequency halves from one band to the next.

use tracing::trace;

use crate::blur::blur_mirrored_5x5;
use crate::consts::{MAX_PYR_LEVELS, PYRAMID_WEIGHTS};
use crate::image::ImageF;

/// Gaussian pyramid of a luminance plane.
#[derive(Debug, Clone, PartialEq)]
pub struct LuminancePyramid {
    levels: Vec<ImageF>,
}

impl LuminancePyramid {
    /// Builds all [`MAX_PYR_LEVELS`] levels from a luminance plane.
    #[must_use]
    pub fn new(luminance: &ImageF) -> Self {
        let mut levels = Vec::with_capacity(MAX_PYR_LEVELS);
        levels.push(luminance.clone());
        for level in 1..MAX_PYR_LEVELS {
            let next = blur_mirrored_5x5(&levels[level - 1], &PYRAMID_WEIGHTS);
            levels.push(next);
        }
        trace!(
            width = luminance.width(),
            height = luminance.height(),
            levels = MAX_PYR_LEVELS,
            "built luminance pyramid"
        );
        Self { levels }
    }

    /// Returns one level.
    #[cfg(any(test, feature = "internals"))]
    #[inline]
    #[must_use]
    pub fn level(&self, index: usize) -> &ImageF {
        &self.levels[index]
    }

    /// Returns row `y` of every level.
    #[inline]
    #[must_use]
    pub fn rows(&self, y: usize) -> [&[f32]; MAX_PYR_LEVELS] {
        std::array::from_fn(|level| self.levels[level].row(y))
    }
}
