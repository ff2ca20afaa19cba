use noise::{NoiseFn, Perlin};

use super::NoiseKernel;

/// Classic Perlin noise from the `noise` crate.
///
/// Zero on every integer lattice point, which can show faint grid
/// structure at low periods; kept as an alternative to [`super::SimplexKernel`].
#[derive(Clone, Debug)]
pub struct PerlinKernel {
    perlin: Perlin,
}

impl PerlinKernel {
    /// The `noise` crate seeds with 32 bits; the high half is folded in.
    pub fn new(seed: u64) -> Self {
        let folded = (seed ^ (seed >> 32)) as u32;
        Self {
            perlin: Perlin::new(folded),
        }
    }
}

impl NoiseKernel for PerlinKernel {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.perlin.get([x, y]).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perlin_range_and_determinism() {
        let a = PerlinKernel::new(77);
        let b = PerlinKernel::new(77);
        for j in 0..50 {
            for i in 0..50 {
                let (x, y) = (i as f64 * 0.13 - 3.0, j as f64 * 0.29 - 7.0);
                let v = a.sample(x, y);
                assert!((-1.0..=1.0).contains(&v));
                assert_eq!(v, b.sample(x, y));
            }
        }
    }

    #[test]
    fn test_high_seed_bits_matter() {
        let low = PerlinKernel::new(1);
        let high = PerlinKernel::new(1 | (5 << 32));
        let differs = (0..100).any(|i| {
            let x = i as f64 * 0.37 + 0.1;
            (low.sample(x, 0.45) - high.sample(x, 0.45)).abs() > 1e-9
        });
        assert!(differs);
    }
}
