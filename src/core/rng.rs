//! RNG module - deterministic shape delivery
//!
//! A small LCG plus a uniform shape source with a one-piece lookahead, so a
//! driver can show the player what comes next. Seeded construction keeps
//! whole sessions reproducible for tests.

use crate::types::ShapeKind;

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
        self.next_u32() % max
    }

    /// Current internal state (for reseeding a fresh session identically)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform shape source with a one-piece preview
#[derive(Debug, Clone)]
pub struct ShapeSource {
    rng: SimpleRng,
    next: ShapeKind,
}

impl ShapeSource {
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = random_kind(&mut rng);
        Self { rng, next }
    }

    /// The shape the next draw will deliver
    pub fn peek(&self) -> ShapeKind {
        self.next
    }

    /// Deliver the previewed shape and queue a new one
    pub fn draw(&mut self) -> ShapeKind {
        let kind = self.next;
        self.next = random_kind(&mut self.rng);
        kind
    }
}

fn random_kind(rng: &mut SimpleRng) -> ShapeKind {
    ShapeKind::ALL[rng.next_range(ShapeKind::ALL.len() as u32) as usize]
}
