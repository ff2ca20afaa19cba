//! Seeded 2D simplex gradient noise.
//!
//! The lattice is skewed into triangles, so there are no square cells for
//! axis-aligned seams to follow. Gradients are 24 unit vectors rotated
//! half a step off the axes, chosen per corner through a permutation table
//! shuffled by a ChaCha8 stream seeded from the caller's seed.

use std::f64::consts::TAU;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::NoiseKernel;

/// Skew factor into simplex space: (sqrt(3) - 1) / 2
const F2: f64 = 0.366_025_403_784_438_6;
/// Unskew factor back to grid space: (3 - sqrt(3)) / 6
const G2: f64 = 0.211_324_865_405_187_1;

const GRADIENT_COUNT: usize = 24;

/// Squared radius of each corner's influence.
const CORNER_RADIUS_SQ: f64 = 0.5;

/// Brings the summed corner contributions of unit gradients to [-1, 1].
const NORMALIZATION: f64 = 99.204_334_582_718_71;

/// Coherent 2D simplex noise parameterised by a seed.
#[derive(Clone, Debug)]
pub struct SimplexKernel {
    perm: [u8; 512],
    gradients: [[f64; 2]; GRADIENT_COUNT],
}

impl SimplexKernel {
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut table: Vec<u8> = (0..=255).collect();
        table.shuffle(&mut rng);

        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }

        let mut gradients = [[0.0; 2]; GRADIENT_COUNT];
        for (k, g) in gradients.iter_mut().enumerate() {
            let angle = (k as f64 + 0.5) * TAU / GRADIENT_COUNT as f64;
            *g = [angle.cos(), angle.sin()];
        }

        Self { perm, gradients }
    }

    fn gradient_index(&self, i: i64, j: i64) -> usize {
        let a = self.perm[(i & 255) as usize] as usize;
        self.perm[a + (j & 255) as usize] as usize % GRADIENT_COUNT
    }

    /// Radial falloff times gradient dot offset; zero (with zero slope) at the rim.
    fn corner(&self, i: i64, j: i64, dx: f64, dy: f64) -> f64 {
        let t = CORNER_RADIUS_SQ - dx * dx - dy * dy;
        if t <= 0.0 {
            return 0.0;
        }
        let g = self.gradients[self.gradient_index(i, j)];
        let t2 = t * t;
        t2 * t2 * (g[0] * dx + g[1] * dy)
    }
}

impl NoiseKernel for SimplexKernel {
    fn sample(&self, x: f64, y: f64) -> f64 {
        let s = (x + y) * F2;
        let i = (x + s).floor();
        let j = (y + s).floor();

        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        // Which of the two triangles in the skewed cell holds the point
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let (ii, jj) = (i as i64, j as i64);
        let n0 = self.corner(ii, jj, x0, y0);
        let n1 = self.corner(ii + i1, jj + j1, x1, y1);
        let n2 = self.corner(ii + 1, jj + 1, x2, y2);

        (NORMALIZATION * (n0 + n1 + n2)).clamp(-1.0, 1.0)
    }
}
