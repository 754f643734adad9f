//! RNG module - 7-bag piece generation and garbage hole placement
//!
//! Each bag contains one of each piece (I, O, T, S, Z, J, L), shuffled.
//! Draws from the bag until empty, then shuffles a new bag. The bag lives in a
//! fixed-capacity array so drawing never touches the heap.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce a short cycle
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are the well-distributed ones.
        (self.next_u32() >> 16) % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceBag {
    bag: ArrayVec<PieceKind, 7>,
    rng: SimpleRng,
}

impl PieceBag {
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            bag: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        };
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        self.rng.shuffle(self.bag.as_mut_slice());
    }

    /// Draw the next piece, refilling the bag when it runs dry.
    pub fn draw(&mut self) -> PieceKind {
        if self.bag.is_empty() {
            self.refill();
        }
        // Non-empty after refill; the fallback is never taken.
        self.bag.pop().unwrap_or(PieceKind::T)
    }

    /// Pieces left before the next refill.
    pub fn remaining(&self) -> usize {
        self.bag.len()
    }
}
