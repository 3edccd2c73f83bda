//! Precomputed reference image for repeated comparisons.
//!
//! When one reference is compared against many candidates (encoder
//! parameter sweeps, regression suites), the reference side of the
//! pipeline only needs to run once: downsampling, colour conversion and
//! the luminance pyramid are cached here.
//!
//! # Example
//!
//! ```rust
//! use pdiff::{Img, PdiffConfig, PdiffReference, RGB};
//!
//! let width = 16;
//! let height = 16;
//! let reference = Img::new(vec![RGB::new(0.5f32, 0.5, 0.5); width * height], width, height);
//! let reference = PdiffReference::new(reference.as_ref(), PdiffConfig::default()).unwrap();
//!
//! for level in [0.5f32, 0.52, 0.9] {
//!     let candidate = Img::new(vec![RGB::new(level, level, level); width * height], width, height);
//!     let result = reference.compare(candidate.as_ref()).unwrap();
//!     println!("{level}: {} pixels differ", result.pixels_failed);
//! }
//! ```

use imgref::ImgRef;
use rgb::RGB;
use tracing::debug;

use crate::diff::{compare_prepared, identical_result, PreparedImage};
use crate::downsample::downsample;
use crate::error::Result;
use crate::image::Image3F;
use crate::input::{check_buffer_len, check_dimensions, planar_from_imgref, planar_from_slice};
use crate::{PdiffConfig, PdiffResult};

/// Reference image with its per-image pipeline stages already computed.
///
/// Results of [`PdiffReference::compare`] are identical to calling
/// [`crate::compare`] with the same reference, candidate and configuration.
#[derive(Debug, Clone)]
pub struct PdiffReference {
    width: usize,
    height: usize,
    config: PdiffConfig,
    prepared: PreparedImage,
}

impl PdiffReference {
    /// Precomputes reference data from an RGB image.
    ///
    /// # Errors
    /// Returns an error if:
    /// - `config` fails validation
    /// - the image is empty
    /// - any channel is negative or not finite
    pub fn new(reference: ImgRef<'_, RGB<f32>>, config: PdiffConfig) -> Result<Self> {
        config.validate()?;
        let (width, height) = (reference.width(), reference.height());
        check_dimensions(width, height, width, height)?;
        let rgb = planar_from_imgref(reference)?;
        Ok(Self::from_planar(&rgb, width, height, config))
    }

    /// Precomputes reference data from a flat interleaved RGB buffer.
    ///
    /// # Errors
    /// Returns an error if:
    /// - `config` fails validation
    /// - the image is empty or `rgb.len() != 3 * width * height`
    /// - any channel is negative or not finite
    pub fn from_slice(rgb: &[f32], width: usize, height: usize, config: PdiffConfig) -> Result<Self> {
        config.validate()?;
        check_dimensions(width, height, width, height)?;
        check_buffer_len(rgb.len(), width, height, "reference")?;
        let rgb = planar_from_slice(rgb, width, height)?;
        Ok(Self::from_planar(&rgb, width, height, config))
    }

    fn from_planar(rgb: &Image3F, width: usize, height: usize, config: PdiffConfig) -> Self {
        let prepared = PreparedImage::new(rgb, &config);
        debug!(
            width,
            height,
            down_sample = config.down_sample(),
            "precomputed reference"
        );
        Self {
            width,
            height,
            config,
            prepared,
        }
    }

    /// Compares a candidate image against the reference.
    ///
    /// # Errors
    /// Returns an error if the candidate's size differs from the reference
    /// or any channel is negative or not finite.
    pub fn compare(&self, candidate: ImgRef<'_, RGB<f32>>) -> Result<PdiffResult> {
        check_dimensions(self.width, self.height, candidate.width(), candidate.height())?;
        let rgb = planar_from_imgref(candidate)?;
        Ok(self.compare_planar(&rgb))
    }

    /// Compares a flat interleaved RGB candidate against the reference.
    ///
    /// # Errors
    /// Returns an error if `candidate.len() != 3 * width * height` or any
    /// channel is negative or not finite.
    pub fn compare_slice(&self, candidate: &[f32]) -> Result<PdiffResult> {
        check_buffer_len(candidate.len(), self.width, self.height, "candidate")?;
        let rgb = planar_from_slice(candidate, self.width, self.height)?;
        Ok(self.compare_planar(&rgb))
    }

    fn compare_planar(&self, candidate: &Image3F) -> PdiffResult {
        // Downsampling is deterministic, so equal inputs give equal planes
        let candidate = downsample(candidate, self.config.down_sample());
        if &candidate == self.prepared.rgb() {
            debug!("candidate is identical to the reference");
            return identical_result(self.prepared.width(), self.prepared.height());
        }
        let candidate = PreparedImage::from_downsampled(candidate, &self.config);
        compare_prepared(&self.prepared, &candidate, &self.config)
    }

    /// Width of the reference image.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the reference image.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Configuration used for this reference.
    #[must_use]
    pub fn config(&self) -> &PdiffConfig {
        &self.config
    }
}
