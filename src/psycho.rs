//! Psychophysical model: luminance thresholds, contrast sensitivity,
//! visual masking and viewing geometry.
//!
//! - `tvi`: threshold-versus-intensity, the smallest visible luminance step
//!   at a given adaptation luminance (Ward-Larson, Rushmeier & Piatko 1997)
//! - `csf`: contrast sensitivity as a function of spatial frequency and
//!   adaptation luminance (Barten 1989); band-pass, peaking near 3.2 cpd
//! - `mask`: threshold elevation caused by existing contrast (Daly 1993)
//! - [`ViewingModel`]: maps pyramid bands to cycles per degree for a given
//!   image width and field of view, and combines the above into a per-pixel
//!   threshold elevation factor

use crate::consts::{
    CSF_PEAK_FREQUENCY, CSF_REFERENCE_LUMINANCE, MAX_ELEVATION, MAX_LUMINANCE, MAX_PYR_LEVELS,
    MIN_ELEVATION, MIN_LUMINANCE, NUM_BANDS,
};

/// Threshold luminance (cd/m²) visible against an adaptation luminance (cd/m²).
#[must_use]
pub fn tvi(adaptation_luminance: f32) -> f32 {
    // max/min also map NaN into range
    let log_a = adaptation_luminance
        .max(MIN_LUMINANCE)
        .min(MAX_LUMINANCE)
        .log10();
    let r = if log_a < -3.94 {
        -2.86
    } else if log_a < -1.44 {
        (0.405 * log_a + 1.6).powf(2.18) - 2.86
    } else if log_a < -0.0184 {
        log_a - 0.395
    } else if log_a < 1.9 {
        (0.249 * log_a + 0.65).powf(2.7) - 0.72
    } else {
        log_a - 1.255
    };
    10.0f32.powf(r)
}

/// Contrast sensitivity at `cpd` cycles per degree and `luminance` cd/m².
///
/// Evaluates `a f e^(-bf) sqrt(1 + 0.06 e^(bf))` as
/// `a f sqrt(e^(-2bf) + 0.06 e^(-bf))`, which cannot overflow for large
/// frequencies. The result is never below the smallest positive `f32`.
#[must_use]
pub fn csf(cpd: f32, luminance: f32) -> f32 {
    let lum = luminance.max(MIN_LUMINANCE);
    let a = 440.0 * (1.0 + 0.7 / lum).powf(-0.2);
    let b = 0.3 * (1.0 + 100.0 / lum).powf(0.15);
    let decay = (-b * cpd).exp();
    let sensitivity = a * cpd * (decay * decay + 0.06 * decay).sqrt();
    sensitivity.max(f32::MIN_POSITIVE)
}

/// Visual masking factor for a CSF-weighted contrast. Always >= 1.
#[must_use]
pub fn mask(contrast: f32) -> f32 {
    let a = (392.498 * contrast).powf(0.7);
    let b = (0.0153 * a).powf(4.0);
    (1.0 + b).powf(0.25)
}

/// Viewing geometry and frequency weighting for one image width.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewingModel {
    one_degree_pixels: f32,
    pixels_per_degree: f32,
    adaptation_level: usize,
    cpd: [f32; MAX_PYR_LEVELS],
    freq_weights: [f32; NUM_BANDS],
}

impl ViewingModel {
    /// Derives the model for an image `width` pixels wide spanning
    /// `field_of_view` degrees horizontally.
    #[must_use]
    pub fn new(width: usize, field_of_view: f32) -> Self {
        let half_angle = (field_of_view * 0.5).to_radians();
        let one_degree_pixels = 2.0 * half_angle.tan() * 180.0 / std::f32::consts::PI;
        let pixels_per_degree = width as f32 / one_degree_pixels;

        // First level whose footprint exceeds one degree of visual angle
        let mut adaptation_level = MAX_PYR_LEVELS - 1;
        let mut num_pixels = 1.0f32;
        for level in 0..MAX_PYR_LEVELS {
            if num_pixels > one_degree_pixels {
                adaptation_level = level;
                break;
            }
            num_pixels *= 2.0;
        }

        let mut cpd = [0.0f32; MAX_PYR_LEVELS];
        cpd[0] = 0.5 * pixels_per_degree;
        for level in 1..MAX_PYR_LEVELS {
            cpd[level] = 0.5 * cpd[level - 1];
        }

        let csf_max = csf(CSF_PEAK_FREQUENCY, CSF_REFERENCE_LUMINANCE);
        let freq_weights = std::array::from_fn(|band| {
            (csf_max / csf(cpd[band], CSF_REFERENCE_LUMINANCE)).min(f32::MAX)
        });

        Self {
            one_degree_pixels,
            pixels_per_degree,
            adaptation_level,
            cpd,
            freq_weights,
        }
    }

    /// Pixels covered by one degree of visual angle.
    #[must_use]
    pub fn one_degree_pixels(&self) -> f32 {
        self.one_degree_pixels
    }

    /// Image pixels per degree of visual angle.
    #[must_use]
    pub fn pixels_per_degree(&self) -> f32 {
        self.pixels_per_degree
    }

    /// Pyramid level whose blur footprint approximates one degree; its
    /// values are the local adaptation luminance.
    #[must_use]
    pub fn adaptation_level(&self) -> usize {
        self.adaptation_level
    }

    /// Spatial frequency (cycles/degree) of each pyramid level.
    #[cfg(any(test, feature = "internals"))]
    #[must_use]
    pub fn cycles_per_degree(&self) -> &[f32; MAX_PYR_LEVELS] {
        &self.cpd
    }

    /// Relative insensitivity of each band compared to the CSF peak. >= 1.
    #[cfg(any(test, feature = "internals"))]
    #[must_use]
    pub fn freq_weights(&self) -> &[f32; NUM_BANDS] {
        &self.freq_weights
    }

    /// Threshold elevation from band contrasts at an adaptation luminance,
    /// in `[MIN_ELEVATION, MAX_ELEVATION]`.
    #[must_use]
    pub fn elevation_factor(&self, contrast: &[f32; NUM_BANDS], adaptation_luminance: f32) -> f32 {
        let sum_contrast = contrast.iter().sum::<f32>().max(MIN_LUMINANCE);

        let mut factor = 0.0f32;
        for band in 0..NUM_BANDS {
            let masking = mask(contrast[band] * csf(self.cpd[band], adaptation_luminance));
            factor += contrast[band] * self.freq_weights[band] * masking / sum_contrast;
        }

        // f32::max/min discard NaN, so the result is always in range
        factor.max(MIN_ELEVATION).min(MAX_ELEVATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tvi_reference_values() {
        assert!((tvi(100.0) - 5.559).abs() < 1e-2);
        assert!((tvi(10.0) - 1.0719).abs() < 1e-3);
        assert!((tvi(1.0) - 0.3913).abs() < 1e-3);
        assert!((tvi(0.01) - 0.005_472).abs() < 1e-4);
    }

    #[test]
    fn test_tvi_is_increasing() {
        let mut previous = 0.0;
        for i in -60..40 {
            let lum = 10.0f32.powf(i as f32 * 0.1);
            let t = tvi(lum);
            assert!(t.is_finite() && t > 0.0);
            assert!(t >= previous * 0.999, "tvi not increasing at {lum}");
            previous = t;
        }
    }

    #[test]
    fn test_tvi_clamps_zero_adaptation() {
        let t = tvi(0.0);
        assert!(t.is_finite() && t > 0.0);
        assert!((t - tvi(MIN_LUMINANCE)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_tvi_is_finite_for_any_input() {
        for lum in [f32::INFINITY, f32::NAN, f32::MAX, -1.0] {
            let t = tvi(lum);
            assert!(t.is_finite() && t > 0.0, "tvi({lum}) = {t}");
        }
        assert!((tvi(f32::INFINITY) - tvi(MAX_LUMINANCE)).abs() <= tvi(MAX_LUMINANCE) * 1e-6);
    }

    #[test]
    fn test_csf_is_band_pass() {
        let peak = csf(CSF_PEAK_FREQUENCY, 100.0);
        assert!((peak - 525.15).abs() < 0.5, "csf peak = {peak}");
        for f in [0.1f32, 0.5, 1.0, 2.0, 3.0, 3.5, 5.0, 10.0, 30.0] {
            assert!(csf(f, 100.0) <= peak, "csf({f}) exceeds the peak");
        }
        assert!(csf(0.1, 100.0) < 0.2 * peak);
        assert!(csf(30.0, 100.0) < 0.1 * peak);
    }

    #[test]
    fn test_csf_stable_for_extreme_frequencies() {
        let v = csf(5000.0, 100.0);
        assert!(v.is_finite() && v > 0.0);
        let v = csf(0.0, 100.0);
        assert!(v.is_finite() && v > 0.0);
        let v = csf(3.0, 0.0);
        assert!(v.is_finite() && v > 0.0);
    }

    #[test]
    fn test_csf_lower_in_dim_light() {
        assert!(csf(4.0, 0.1) < csf(4.0, 100.0));
    }

    #[test]
    fn test_mask() {
        assert!((mask(0.0) - 1.0).abs() < f32::EPSILON);
        assert!(mask(0.01) >= 1.0);
        assert!(mask(1.0) > mask(0.1));
        assert!(mask(10.0) > mask(1.0));
    }

    #[test]
    fn test_viewing_model_geometry() {
        let model = ViewingModel::new(640, 45.0);
        assert!((model.one_degree_pixels() - 47.46).abs() < 0.01);
        assert!((model.pixels_per_degree() - 640.0 / 47.46).abs() < 0.01);
        // 2^6 = 64 is the first power of two above 47.46
        assert_eq!(model.adaptation_level(), 6);

        let cpd = model.cycles_per_degree();
        assert!((cpd[0] - 0.5 * model.pixels_per_degree()).abs() < 1e-4);
        for level in 1..MAX_PYR_LEVELS {
            assert!((cpd[level] * 2.0 - cpd[level - 1]).abs() < 1e-4);
        }
        for &w in model.freq_weights() {
            assert!(w >= 0.999, "frequency weight {w} below the peak weight");
        }
    }

    #[test]
    fn test_viewing_model_narrow_field() {
        // Less than one pixel per degree: adaptation happens at level 0
        let model = ViewingModel::new(64, 0.5);
        assert!(model.one_degree_pixels() < 1.0);
        assert_eq!(model.adaptation_level(), 0);
        assert!(model.freq_weights().iter().all(|w| w.is_finite()));
    }

    #[test]
    fn test_elevation_factor_range() {
        let model = ViewingModel::new(256, 45.0);
        assert!((model.elevation_factor(&[0.0; NUM_BANDS], 50.0) - 1.0).abs() < f32::EPSILON);

        let strong = [5.0; NUM_BANDS];
        let f = model.elevation_factor(&strong, 50.0);
        assert!((MIN_ELEVATION..=MAX_ELEVATION).contains(&f));
        assert!(f > 1.0);

        let f = model.elevation_factor(&[f32::MAX; NUM_BANDS], 50.0);
        assert!((MIN_ELEVATION..=MAX_ELEVATION).contains(&f));
    }
}
