//! RNG module - 7-bag piece generation with naut injection
//!
//! Implements the "7-bag" randomization algorithm used in modern Tetris.
//! Each batch contains one of each classic piece (I, O, T, S, Z, J, L),
//! shuffled. When nauts are enabled every piece of the batch is independently
//! swapped for a naut with probability `naut_probability / 10`.
//!
//! Also provides a simple LCG so that a seed reproduces a whole game.

use crate::block::DropBlock;
use crate::types::{Matrix, PieceKind, MAX_NAUT_PROBABILITY};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low LCG bits cycle with short periods; use the high half.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Produces batches of spawn-ready drop blocks
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Shuffled kinds for the next batch
    pub fn next_kinds(&mut self, use_nauts: bool, naut_probability: u8) -> [PieceKind; 7] {
        let mut bag = PieceKind::CLASSIC;
        self.rng.shuffle(&mut bag);

        if use_nauts {
            let chance = naut_probability.min(MAX_NAUT_PROBABILITY) as u32;
            for kind in bag.iter_mut() {
                if self.rng.next_range(MAX_NAUT_PROBABILITY as u32) < chance {
                    *kind = PieceKind::Naut;
                }
            }
        }

        bag
    }

    /// Generate a batch positioned for `matrix`
    pub fn generate(
        &mut self,
        matrix: Matrix,
        use_nauts: bool,
        naut_probability: u8,
    ) -> Vec<DropBlock> {
        self.next_kinds(use_nauts, naut_probability)
            .iter()
            .map(|&kind| DropBlock::spawn(kind, matrix))
            .collect()
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_not_stuck() {
        let mut rng = SimpleRng::new(0);
        let a = rng.next_u32();
        let b = rng.next_u32();
        assert_ne!(a, b);
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(10) < 10);
        }
    }

    #[test]
    fn test_batch_contains_each_classic_once() {
        let mut generator = PieceGenerator::new(99);
        for _ in 0..20 {
            let mut kinds = generator.next_kinds(false, 10).to_vec();
            kinds.sort_by_key(|k| k.color_index());
            assert_eq!(kinds, PieceKind::CLASSIC.to_vec());
        }
    }

    #[test]
    fn test_naut_probability_bounds() {
        let mut generator = PieceGenerator::new(3);
        let all = generator.next_kinds(true, 10);
        assert!(all.iter().all(|&k| k == PieceKind::Naut));

        let none = generator.next_kinds(true, 0);
        assert!(none.iter().all(|&k| k != PieceKind::Naut));
    }

    #[test]
    fn test_generated_blocks_are_spawn_ready() {
        let matrix = Matrix::new(6, 10);
        let mut generator = PieceGenerator::new(5);
        let batch = generator.generate(matrix, true, 5);
        assert_eq!(batch.len(), 7);
        assert!(batch.iter().all(|b| b.is_valid_in_matrix(&[], matrix)));
    }
}
