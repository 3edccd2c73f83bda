//! Separable 5-tap low-pass filter with mirrored borders.
//!
//! This is the smoothing step between pyramid levels. Both passes run
//! along rows so the interior can be vectorized with `f32x8`: the
//! horizontal pass shifts one row, the vertical pass combines five rows.
//!
//! Optimizations:
//! - Interior pixels use explicit f32x8 SIMD, borders fall back to scalar
//! - Rows are independent, so both passes parallelize across rows

use wide::f32x8;

use crate::image::ImageF;

/// Mirrors a coordinate outside image bounds.
///
/// The mirror is placed outside the last pixel, so the edge pixel is not
/// repeated: -1 → 0, -2 → 1, size → size-1, size+1 → size-2. Reflection
/// repeats until the coordinate lands inside, which keeps 1- and 2-pixel
/// wide images valid.
#[inline]
pub(crate) fn mirror(mut x: i32, size: i32) -> usize {
    while x < 0 || x >= size {
        if x < 0 {
            x = -x - 1;
        } else {
            x = 2 * size - 1 - x;
        }
    }
    x as usize
}

/// Weighted sum of five aligned taps: `t2*w0 + (t1+t3)*w1 + (t0+t4)*w2`.
///
/// Every tap slice must be at least `out.len()` long.
fn weighted_sum5(taps: [&[f32]; 5], weights: &[f32; 3], out: &mut [f32]) {
    let [w0, w1, w2] = *weights;
    let (v0, v1, v2) = (f32x8::splat(w0), f32x8::splat(w1), f32x8::splat(w2));
    let n = out.len();
    let simd_chunks = n / 8;

    for chunk in 0..simd_chunks {
        let o = chunk * 8;
        let load = |tap: &[f32]| {
            let mut arr = [0.0f32; 8];
            arr.copy_from_slice(&tap[o..o + 8]);
            f32x8::from(arr)
        };
        let sum = load(taps[2]) * v0
            + (load(taps[1]) + load(taps[3])) * v1
            + (load(taps[0]) + load(taps[4])) * v2;
        let results: [f32; 8] = sum.into();
        out[o..o + 8].copy_from_slice(&results);
    }

    // Scalar tail, same operation order as the SIMD lanes
    for o in simd_chunks * 8..n {
        out[o] = taps[2][o] * w0 + (taps[1][o] + taps[3][o]) * w1 + (taps[0][o] + taps[4][o]) * w2;
    }
}

/// Convolves one row with the symmetric 5-tap kernel.
fn convolve_row(row_in: &[f32], weights: &[f32; 3], row_out: &mut [f32]) {
    let width = row_in.len();
    let iwidth = width as i32;
    let [w0, w1, w2] = *weights;

    let border1 = 2.min(width);
    let border2 = width.saturating_sub(2).max(border1);

    // Interior: shifted views of the input row act as the five taps
    if border2 > border1 {
        let n = border2 - border1;
        let taps = [
            &row_in[border1 - 2..border1 - 2 + n],
            &row_in[border1 - 1..border1 - 1 + n],
            &row_in[border1..border1 + n],
            &row_in[border1 + 1..border1 + 1 + n],
            &row_in[border1 + 2..border1 + 2 + n],
        ];
        weighted_sum5(taps, weights, &mut row_out[border1..border2]);
    }

    for x in (0..border1).chain(border2..width) {
        let ix = x as i32;
        let tap = |dx: i32| row_in[mirror(ix + dx, iwidth)];
        row_out[x] = tap(0) * w0 + (tap(-1) + tap(1)) * w1 + (tap(-2) + tap(2)) * w2;
    }
}

/// Blurs an image with a separable symmetric 5x5 kernel and mirrored borders.
///
/// `weights` is `[center, offset 1, offset 2]`; the kernel is
/// `[w2, w1, w0, w1, w2]` along each axis.
#[must_use]
pub fn blur_mirrored_5x5(input: &ImageF, weights: &[f32; 3]) -> ImageF {
    let width = input.width();
    let height = input.height();
    let iheight = height as i32;

    let mut temp = ImageF::new(width, height);
    temp.for_each_row_mut(|y, row_out| convolve_row(input.row(y), weights, row_out));

    let mut output = ImageF::new(width, height);
    output.for_each_row_mut(|y, row_out| {
        let iy = y as i32;
        let taps = [-2, -1, 0, 1, 2].map(|dy| temp.row(mirror(iy + dy, iheight)));
        weighted_sum5(taps, weights, row_out);
    });

    output
}
