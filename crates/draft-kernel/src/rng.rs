//! Deterministic jitter for organic pattern families.
//!
//! Textures such as stone or sand need irregularity, but re-tiling the same
//! bounds with the same spec must give identical output. Every lattice cell
//! therefore gets its own generator, seeded from `(seed, column, row)`, so
//! the result does not depend on iteration order or on how many cells a
//! previous call visited.

/// Mix a 64-bit value (SplitMix64 finalizer).
#[inline]
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Seed for one lattice cell.
#[inline]
pub fn cell_seed(seed: u64, column: i64, row: i64) -> u64 {
    let h = mix(seed ^ 0x9e37_79b9_7f4a_7c15);
    let h = mix(h ^ column as u64);
    mix(h ^ (row as u64).rotate_left(32))
}

/// Small SplitMix64 generator.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generator dedicated to one lattice cell.
    #[inline]
    pub fn for_cell(seed: u64, column: i64, row: i64) -> Self {
        Self::new(cell_seed(seed, column, row))
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        mix(self.state)
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[-1, 1)`.
    #[inline]
    pub fn next_signed(&mut self) -> f64 {
        self.next_f64() * 2.0 - 1.0
    }

    /// Uniform in `[min, max)`.
    #[inline]
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}
