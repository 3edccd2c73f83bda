//! Constants for the colour conversion, pyramid and decision stages.
//!
//! Psychophysical curve coefficients (TVI, CSF, masking) live next to the
//! functions that use them in `psycho`.

// ============================================================================
// Colour Space Constants
// ============================================================================

/// Adobe RGB (1998) to CIE XYZ, D65 reference white (Bruce Lindbloom).
pub const ADOBE_RGB_TO_XYZ: [f32; 9] = [
    0.576_700,
    0.185_556,
    0.188_212, // X
    0.297_361,
    0.627_355,
    0.075_284_7, // Y
    0.027_032_8,
    0.070_687_9,
    0.991_248, // Z
];

/// CIE L*a*b* linear/cube-root switch point, 216/24389.
pub const LAB_EPSILON: f32 = 216.0 / 24389.0;

/// CIE L*a*b* linear segment slope, 24389/27.
pub const LAB_KAPPA: f32 = 24389.0 / 27.0;

// ============================================================================
// Pyramid Constants
// ============================================================================

/// Number of pyramid levels. Levels are all full resolution.
pub const MAX_PYR_LEVELS: usize = 8;

/// Number of band-pass contrast bands (adjacent level pairs with a level
/// above them to normalize against).
pub const NUM_BANDS: usize = MAX_PYR_LEVELS - 2;

/// Separable 5-tap low-pass weights: [center, offset 1, offset 2].
///
/// The full kernel is `[0.05, 0.25, 0.4, 0.25, 0.05]` and sums to 1.
pub const PYRAMID_WEIGHTS: [f32; 3] = [0.4, 0.25, 0.05];

// ============================================================================
// Decision Constants
// ============================================================================

/// Spatial frequency (cycles/degree) where the CSF peaks at 100 cd/m².
pub const CSF_PEAK_FREQUENCY: f32 = 3.248;

/// Adaptation luminance used for the frequency weights, cd/m².
pub const CSF_REFERENCE_LUMINANCE: f32 = 100.0;

/// Lower clamp for adaptation luminance and contrast denominators.
pub const MIN_LUMINANCE: f32 = 1e-5;

/// Upper clamp for the display response `c^gamma` of one channel.
///
/// Keeps XYZ and L*a*b* finite for any finite input radiance.
pub const MAX_RESPONSE: f32 = 1e30;

/// Upper clamp for luminance in cd/m². Leaves headroom so pyramid sums,
/// band differences and threshold products cannot overflow.
pub const MAX_LUMINANCE: f32 = 1e30;

/// Threshold elevation factor range. The lower bound is one JND.
pub const MIN_ELEVATION: f32 = 1.0;
/// Upper bound of the threshold elevation factor.
pub const MAX_ELEVATION: f32 = 10.0;

/// Below this adaptation luminance (cd/m²) vision is scotopic and the
/// colour test is disabled.
pub const SCOTOPIC_LUMINANCE: f32 = 10.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pyramid_kernel_is_normalized() {
        let [w0, w1, w2] = PYRAMID_WEIGHTS;
        assert!((w0 + 2.0 * w1 + 2.0 * w2 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rgb_white_has_unit_luminance() {
        let y: f32 = ADOBE_RGB_TO_XYZ[3..6].iter().sum();
        assert!((y - 1.0).abs() < 1e-5);
    }
}
