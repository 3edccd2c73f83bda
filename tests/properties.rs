//! Algebraic properties of the comparison, checked with proptest.

mod common;

use common::generators::gen_noise;
use pdiff::{compare_slices, PdiffConfig};
use proptest::prelude::*;

/// Random image of `width x height` pixels with channels in `[0, 1]`.
fn image(width: usize, height: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(0.0f32..=1.0, width * height * 3)
}

/// Two random images of the same random size.
fn image_pair() -> impl Strategy<Value = (usize, usize, Vec<f32>, Vec<f32>)> {
    (1usize..12, 1usize..12).prop_flat_map(|(w, h)| {
        (Just(w), Just(h), image(w, h), image(w, h))
    })
}

fn count(mask: &[bool]) -> usize {
    mask.iter().filter(|&&d| d).count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn identical_inputs_never_fail((w, h, a, _b) in image_pair(), down_sample in 0usize..4) {
        let config = PdiffConfig::new().with_down_sample(down_sample);
        let result = compare_slices(&a, &a, w, h, &config).unwrap();
        prop_assert_eq!(result.pixels_failed, 0);
        prop_assert!(result.mask.buf().iter().all(|&d| !d));
    }

    #[test]
    fn comparison_is_symmetric((w, h, a, b) in image_pair()) {
        let config = PdiffConfig::default();
        let ab = compare_slices(&a, &b, w, h, &config).unwrap();
        let ba = compare_slices(&b, &a, w, h, &config).unwrap();
        prop_assert_eq!(ab.pixels_failed, ba.pixels_failed);
        prop_assert_eq!(ab.mask.buf(), ba.mask.buf());
    }

    #[test]
    fn count_matches_mask((w, h, a, b) in image_pair(), luminance_only in any::<bool>()) {
        let config = PdiffConfig::new().with_luminance_only(luminance_only);
        let result = compare_slices(&a, &b, w, h, &config).unwrap();
        prop_assert_eq!(result.pixels_failed, count(result.mask.buf()));
        prop_assert_eq!(result.failed_pixels().count(), result.pixels_failed);
    }

    #[test]
    fn luminance_only_is_a_subset((w, h, a, b) in image_pair()) {
        let full = compare_slices(&a, &b, w, h, &PdiffConfig::default()).unwrap();
        let lum = compare_slices(&a, &b, w, h, &PdiffConfig::new().with_luminance_only(true)).unwrap();
        for (&l, &f) in lum.mask.buf().iter().zip(full.mask.buf()) {
            prop_assert!(!l || f);
        }
        prop_assert!(lum.pixels_failed <= full.pixels_failed);
    }

    #[test]
    fn colour_factor_is_monotonic(
        (w, h, a, b) in image_pair(),
        low in 0.0f32..2.0,
        extra in 0.0f32..4.0,
    ) {
        let weak = PdiffConfig::new().with_color_factor(low);
        let strong = PdiffConfig::new().with_color_factor(low + extra);
        let weak = compare_slices(&a, &b, w, h, &weak).unwrap();
        let strong = compare_slices(&a, &b, w, h, &strong).unwrap();
        for (&lo, &hi) in weak.mask.buf().iter().zip(strong.mask.buf()) {
            prop_assert!(!lo || hi);
        }
    }

    #[test]
    fn downsampled_mask_size(w in 1usize..40, h in 1usize..40, k in 2usize..6, seed in any::<u64>()) {
        let a = gen_noise(w, h, seed);
        let b = gen_noise(w, h, seed.wrapping_add(1));
        let config = PdiffConfig::new().with_down_sample(k);
        let result = compare_slices(&a, &b, w, h, &config).unwrap();
        prop_assert_eq!(result.width(), w.div_ceil(k));
        prop_assert_eq!(result.height(), h.div_ceil(k));
        prop_assert_eq!(result.mask.buf().len(), w.div_ceil(k) * h.div_ceil(k));
    }

    #[test]
    fn mismatched_sizes_are_rejected(w in 1usize..8, h in 1usize..8, extra in 1usize..4) {
        let a = gen_noise(w, h, 1);
        let b = gen_noise(w, h + extra, 2);
        let a = common::to_img(&a, w, h);
        let b = common::to_img(&b, w, h + extra);
        let result = pdiff::compare(a.as_ref(), b.as_ref(), &PdiffConfig::default());
        prop_assert!(matches!(result, Err(pdiff::PdiffError::InvalidDimensions(_))));
    }
}
