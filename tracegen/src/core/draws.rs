//! The single sequential random stream consumed by line agents.
//!
//! Every random decision in a session goes through one [`DrawSource`], one
//! value per decision, so a seed fully determines the drawing.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A stream of uniform values in `[0, 1)`.
pub trait DrawSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `0..=max`, taken from a single unit draw.
    fn next_up_to(&mut self, max: u32) -> u32 {
        let span = f64::from(max) + 1.0;
        // `next_unit` is < 1.0, so the floor is at most `max`.
        ((self.next_unit() * span).floor() as u32).min(max)
    }
}

impl<D: DrawSource + ?Sized> DrawSource for &mut D {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Seeded production stream.
///
/// ChaCha8 output is stable across platforms and `rand` releases, so a seed
/// recorded today replays the same drawing later.
#[derive(Debug, Clone)]
pub struct SeededDraws {
    rng: ChaCha8Rng,
}

impl SeededDraws {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DrawSource for SeededDraws {
    fn next_unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

/// Pick a fresh human-sized seed when none was supplied.
pub fn fresh_seed() -> u64 {
    rand::thread_rng().gen_range(0..1_000_000)
}
