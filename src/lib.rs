//! # pdiff
//!
//! Perceptual image comparison after Yee's "perceptual metric for
//! production testing". Two renders of the same scene are compared the way
//! a viewer would see them, and only pixels whose difference is actually
//! visible are reported.
//!
//! The model is based on:
//! - Adaptation: the threshold-versus-intensity curve of the eye at the
//!   local luminance level
//! - Contrast sensitivity: how visible each spatial frequency is at a given
//!   viewing distance
//! - Visual masking: how existing contrast hides changes
//! - Colour: a*b* distance in CIE L*a*b*, disabled in scotopic light
//!
//! ## Example
//!
//! ```rust
//! use pdiff::{compare, Img, PdiffConfig, RGB};
//!
//! let width = 8;
//! let height = 8;
//! let background = vec![RGB::new(0.1f32, 0.1, 0.1); width * height];
//! let mut changed = background.clone();
//! changed[3 * width + 2] = RGB::new(0.9, 0.9, 0.9);
//!
//! let a = Img::new(background, width, height);
//! let b = Img::new(changed, width, height);
//!
//! let result = compare(a.as_ref(), b.as_ref(), &PdiffConfig::default()).unwrap();
//! assert_eq!(result.pixels_failed, 1);
//! assert!(result.is_different(2, 3));
//! ```
//!
//! ## Features
//!
//! - **`parallel`** (default): run the per-row stages on rayon's thread pool
//! - **`serde`**: `Serialize`/`Deserialize` for [`PdiffConfig`]
//! - **`internals`**: Expose internal modules for testing/benchmarking (unstable API)
//!
//! ## References
//!
//! - H. Yee, "A Perceptual Metric for Production Testing", Journal of
//!   Graphics Tools 9(4), 2004
//! - <https://pdiff.sourceforge.net/>

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
// Psychophysical constants are quoted as published
#![allow(clippy::unreadable_literal)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]

// Internal modules - exposed with "internals" feature for testing/benchmarking
#[cfg(feature = "internals")]
pub mod blur;
#[cfg(not(feature = "internals"))]
pub(crate) mod blur;

#[cfg(feature = "internals")]
pub mod color;
#[cfg(not(feature = "internals"))]
pub(crate) mod color;

#[cfg(feature = "internals")]
pub mod consts;
#[cfg(not(feature = "internals"))]
pub(crate) mod consts;

mod config;
mod diff;

#[cfg(feature = "internals")]
pub mod downsample;
#[cfg(not(feature = "internals"))]
pub(crate) mod downsample;

mod error;

#[cfg(feature = "internals")]
pub mod image;
#[cfg(not(feature = "internals"))]
pub(crate) mod image;

mod input;

pub mod precompute;
// Re-export PdiffReference for convenience
pub use precompute::PdiffReference;

#[cfg(feature = "internals")]
pub mod psycho;
#[cfg(not(feature = "internals"))]
pub(crate) mod psycho;

#[cfg(feature = "internals")]
pub mod pyramid;
#[cfg(not(feature = "internals"))]
pub(crate) mod pyramid;

pub use crate::config::PdiffConfig;
pub use crate::error::{PdiffError, Result};

// Re-export imgref and rgb types for convenience
pub use imgref::{Img, ImgRef, ImgVec};
pub use rgb::RGB;

use crate::input::{check_buffer_len, check_dimensions, planar_from_imgref, planar_from_slice};

/// Outcome of a perceptual comparison.
#[derive(Debug, Clone)]
pub struct PdiffResult {
    /// Number of pixels whose difference is visible.
    pub pixels_failed: usize,
    /// Per-pixel verdict, `true` where the images visibly differ.
    ///
    /// Sized to the comparison resolution, which is smaller than the input
    /// when [`PdiffConfig::with_down_sample`] is used.
    pub mask: ImgVec<bool>,
}

impl PdiffResult {
    /// Width of the mask.
    #[must_use]
    pub fn width(&self) -> usize {
        self.mask.width()
    }

    /// Height of the mask.
    #[must_use]
    pub fn height(&self) -> usize {
        self.mask.height()
    }

    /// Whether pixel `(x, y)` of the mask failed.
    ///
    /// # Panics
    /// Panics if `(x, y)` is outside the mask.
    #[must_use]
    pub fn is_different(&self, x: usize, y: usize) -> bool {
        assert!(x < self.width() && y < self.height(), "({x}, {y}) outside the mask");
        self.mask.buf()[y * self.mask.stride() + x]
    }

    /// True when no pixel failed.
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.pixels_failed == 0
    }

    /// Failed pixels as a fraction of the mask area, in `[0, 1]`.
    #[must_use]
    pub fn fraction_failed(&self) -> f64 {
        let total = self.width() * self.height();
        if total == 0 {
            0.0
        } else {
            self.pixels_failed as f64 / total as f64
        }
    }

    /// True when more than `tolerance` pixels failed.
    ///
    /// Test harnesses usually accept a small number of failing pixels
    /// before declaring two renders different.
    #[must_use]
    pub fn exceeds(&self, tolerance: usize) -> bool {
        self.pixels_failed > tolerance
    }

    /// Coordinates of every failed pixel, row by row.
    pub fn failed_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (width, stride) = (self.width(), self.mask.stride());
        self.mask.buf().chunks(stride).enumerate().flat_map(move |(y, row)| {
            row[..width]
                .iter()
                .enumerate()
                .filter(|(_, &different)| different)
                .map(move |(x, _)| (x, y))
        })
    }
}

/// Compares two RGB images perceptually.
///
/// Channel values are linear-light radiances before gamma, so `1.0` maps
/// to [`PdiffConfig::peak_luminance`] after `gamma` is applied. Values
/// above `1.0` are accepted.
///
/// # Errors
/// Returns an error if:
/// - `config` fails validation
/// - the images differ in size or are empty
/// - any channel is negative or not finite
pub fn compare(
    a: ImgRef<'_, RGB<f32>>,
    b: ImgRef<'_, RGB<f32>>,
    config: &PdiffConfig,
) -> Result<PdiffResult> {
    config.validate()?;
    check_dimensions(a.width(), a.height(), b.width(), b.height())?;
    let a = planar_from_imgref(a)?;
    let b = planar_from_imgref(b)?;
    Ok(diff::compare_images(&a, &b, config))
}

/// Compares two flat interleaved RGB buffers of `width * height` pixels.
///
/// Each buffer holds `3 * width * height` values, row-major, in R, G, B
/// order.
///
/// # Errors
/// Returns an error if:
/// - `config` fails validation
/// - `width` or `height` is zero, or a buffer has the wrong length
/// - any channel is negative or not finite
///
/// # Example
///
/// ```rust
/// use pdiff::{compare_slices, PdiffConfig};
///
/// let a = vec![0.5f32; 4 * 4 * 3];
/// let result = compare_slices(&a, &a, 4, 4, &PdiffConfig::default()).unwrap();
/// assert!(result.is_identical());
/// ```
pub fn compare_slices(
    a: &[f32],
    b: &[f32],
    width: usize,
    height: usize,
    config: &PdiffConfig,
) -> Result<PdiffResult> {
    config.validate()?;
    check_dimensions(width, height, width, height)?;
    check_buffer_len(a.len(), width, height, "image a")?;
    check_buffer_len(b.len(), width, height, "image b")?;
    let a = planar_from_slice(a, width, height)?;
    let b = planar_from_slice(b, width, height)?;
    Ok(diff::compare_images(&a, &b, config))
}
