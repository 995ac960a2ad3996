//! Seeded 2D simplex noise with fractal (multi-octave) summation.

use crate::{foundation::math::clamp01, noise::rng::Rng64};

/// Upper bound on fractal octaves; higher counts are clamped.
pub const MAX_OCTAVES: u32 = 6;

const GRAD3: [[f64; 2]; 12] = [
    [1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
    [0.0, 1.0],
    [0.0, -1.0],
];

/// Deterministic 2D gradient-noise field.
///
/// The permutation table is a seeded shuffle of `0..=255`, doubled to 512 entries so corner
/// lookups never need a wraparound check. The field is immutable after construction: sampling
/// the same `(x, y)` always returns bit-identical output.
#[derive(Clone)]
pub struct NoiseField {
    seed: u64,
    perm: [u8; 512],
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl NoiseField {
    /// Build the permutation table for `seed`.
    pub fn new(seed: u64) -> Self {
        let mut table = [0u8; 256];
        for (i, v) in table.iter_mut().enumerate() {
            *v = i as u8;
        }

        // Fisher-Yates.
        let mut rng = Rng64::new(seed);
        for i in (1..table.len()).rev() {
            let j = (rng.next_u64() % (i as u64 + 1)) as usize;
            table.swap(i, j);
        }

        let mut perm = [0u8; 512];
        perm[..256].copy_from_slice(&table);
        perm[256..].copy_from_slice(&table);
        Self { seed, perm }
    }

    /// Seed this field was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Raw simplex sample, approximately in `[-1, 1]`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let f2 = 0.5 * (3.0_f64.sqrt() - 1.0);
        let g2 = (3.0 - 3.0_f64.sqrt()) / 6.0;

        // Skew into the triangular grid to find the containing cell.
        let s = (x + y) * f2;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let t = (i + j) * g2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        let (i1, j1) = if x0 > y0 { (1usize, 0usize) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + g2;
        let y1 = y0 - j1 as f64 + g2;
        let x2 = x0 - 1.0 + 2.0 * g2;
        let y2 = y0 - 1.0 + 2.0 * g2;

        let ii = ((i as i64) & 255) as usize;
        let jj = ((j as i64) & 255) as usize;
        let p = &self.perm;
        let gi0 = usize::from(p[ii + usize::from(p[jj])]) % 12;
        let gi1 = usize::from(p[ii + i1 + usize::from(p[jj + j1])]) % 12;
        let gi2 = usize::from(p[ii + 1 + usize::from(p[jj + 1])]) % 12;

        let n0 = corner(gi0, x0, y0);
        let n1 = corner(gi1, x1, y1);
        let n2 = corner(gi2, x2, y2);

        70.0 * (n0 + n1 + n2)
    }

    /// Multi-octave sum of [`Self::sample`], remapped to `[0, 1]`.
    ///
    /// Each octave doubles frequency and halves amplitude; the sum is normalized by the total
    /// amplitude before the `(v + 1) / 2` remap. `octaves` is clamped to `1..=MAX_OCTAVES`.
    pub fn fractal(&self, x: f64, y: f64, octaves: u32) -> f64 {
        let octaves = octaves.clamp(1, MAX_OCTAVES);
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves {
            total += self.sample(x * frequency, y * frequency) * amplitude;
            max_value += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        clamp01((total / max_value + 1.0) / 2.0)
    }
}

fn corner(gi: usize, x: f64, y: f64) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        return 0.0;
    }
    let t2 = t * t;
    let g = GRAD3[gi];
    t2 * t2 * (g[0] * x + g[1] * y)
}

#[cfg(test)]
#[path = "../../tests/unit/noise/simplex.rs"]
mod tests;
