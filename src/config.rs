//! Comparison parameters.

use crate::error::{PdiffError, Result};

/// Perceptual comparison parameters.
///
/// Use the builder pattern to construct:
/// ```rust
/// use pdiff::PdiffConfig;
///
/// let config = PdiffConfig::new()
///     .with_field_of_view(60.0)    // wider view, fewer pixels per degree
///     .with_luminance_only(true)   // skip the colour test
///     .with_down_sample(2);        // compare 2x2 block averages
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PdiffConfig {
    luminance_only: bool,
    field_of_view: f32,
    gamma: f32,
    peak_luminance: f32,
    color_factor: f32,
    down_sample: usize,
}

impl Default for PdiffConfig {
    fn default() -> Self {
        Self {
            luminance_only: false,
            field_of_view: 45.0,
            gamma: 2.2,
            peak_luminance: 100.0,
            color_factor: 1.0,
            down_sample: 0,
        }
    }
}

impl PdiffConfig {
    /// Creates a new `PdiffConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only compare luminance; the colour test is skipped.
    #[must_use]
    pub fn with_luminance_only(mut self, luminance_only: bool) -> Self {
        self.luminance_only = luminance_only;
        self
    }

    /// Sets the horizontal field of view covered by the image, in degrees.
    ///
    /// Together with the image width this fixes how many pixels fall in one
    /// degree of visual angle, which drives the contrast sensitivity model.
    #[must_use]
    pub fn with_field_of_view(mut self, field_of_view: f32) -> Self {
        self.field_of_view = field_of_view;
        self
    }

    /// Sets the display gamma applied to each channel before conversion.
    #[must_use]
    pub fn with_gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
        self
    }

    /// Sets the luminance of a full-scale white, in cd/m².
    #[must_use]
    pub fn with_peak_luminance(mut self, peak_luminance: f32) -> Self {
        self.peak_luminance = peak_luminance;
        self
    }

    /// Sets the chromatic sensitivity multiplier. 0 disables the colour test.
    #[must_use]
    pub fn with_color_factor(mut self, color_factor: f32) -> Self {
        self.color_factor = color_factor;
        self
    }

    /// Sets the box-filter downsample factor. 0 and 1 leave images untouched.
    #[must_use]
    pub fn with_down_sample(mut self, down_sample: usize) -> Self {
        self.down_sample = down_sample;
        self
    }

    /// Returns whether only luminance is compared.
    #[must_use]
    pub fn luminance_only(&self) -> bool {
        self.luminance_only
    }

    /// Returns the field of view in degrees.
    #[must_use]
    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    /// Returns the display gamma.
    #[must_use]
    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    /// Returns the peak luminance in cd/m².
    #[must_use]
    pub fn peak_luminance(&self) -> f32 {
        self.peak_luminance
    }

    /// Returns the chromatic sensitivity multiplier.
    #[must_use]
    pub fn color_factor(&self) -> f32 {
        self.color_factor
    }

    /// Returns the downsample factor.
    #[must_use]
    pub fn down_sample(&self) -> usize {
        self.down_sample
    }

    /// Checks every parameter range.
    ///
    /// # Errors
    /// Returns [`PdiffError::InvalidConfiguration`] naming the first bad
    /// parameter: `field_of_view` outside (0, 180), non-positive `gamma` or
    /// `peak_luminance`, negative `color_factor`, or any non-finite value.
    pub fn validate(&self) -> Result<()> {
        let invalid = |parameter, value: f32| PdiffError::InvalidConfiguration {
            parameter,
            value: f64::from(value),
        };

        // tan(fov / 2) diverges at 180 degrees
        if !(self.field_of_view > 0.0 && self.field_of_view < 180.0) {
            return Err(invalid("field_of_view", self.field_of_view));
        }
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(invalid("gamma", self.gamma));
        }
        if !(self.peak_luminance.is_finite() && self.peak_luminance > 0.0) {
            return Err(invalid("peak_luminance", self.peak_luminance));
        }
        if !(self.color_factor.is_finite() && self.color_factor >= 0.0) {
            return Err(invalid("color_factor", self.color_factor));
        }
        Ok(())
    }
}
