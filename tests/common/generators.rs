//! Deterministic synthetic images for pdiff tests.
//!
//! Everything is driven by an LCG PRNG, so inputs are identical on every
//! platform and every run.

/// LCG pseudo-random number generator (deterministic)
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 32) as u32
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform value in `[min, max)`.
    pub fn next_f32_range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }
}

/// Uniform colour image.
pub fn gen_uniform(width: usize, height: usize, r: f32, g: f32, b: f32) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height * 3);
    for _ in 0..width * height {
        data.extend_from_slice(&[r, g, b]);
    }
    data
}

/// Horizontal grayscale ramp from 0 to 1.
pub fn gen_gradient_h(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height * 3);
    for _y in 0..height {
        for x in 0..width {
            let v = if width > 1 {
                x as f32 / (width - 1) as f32
            } else {
                0.5
            };
            data.extend_from_slice(&[v, v, v]);
        }
    }
    data
}

/// Checkerboard of `cell`-pixel squares alternating between `lo` and `hi`.
pub fn gen_checkerboard(width: usize, height: usize, cell: usize, lo: f32, hi: f32) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let v = if (x / cell + y / cell) % 2 == 0 { lo } else { hi };
            data.extend_from_slice(&[v, v, v]);
        }
    }
    data
}

/// Random colour noise in `[0, 1)`.
pub fn gen_noise(width: usize, height: usize, seed: u64) -> Vec<f32> {
    let mut rng = Lcg::new(seed);
    (0..width * height * 3).map(|_| rng.next_f32()).collect()
}

/// Adds bounded random noise to every channel, clamping at zero.
pub fn add_noise(rgb: &[f32], amplitude: f32, seed: u64) -> Vec<f32> {
    let mut rng = Lcg::new(seed);
    rgb.iter()
        .map(|&v| (v + rng.next_f32_range(-amplitude, amplitude)).max(0.0))
        .collect()
}
