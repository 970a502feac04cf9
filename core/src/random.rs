use rand::prelude::*;

/// Random source owned by a single game instance.
#[derive(Clone, Debug)]
pub(crate) struct GameRng {
    rng: SmallRng,
}

impl GameRng {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Uniform value in `0..n`, `n` must be non-zero.
    pub(crate) fn below(&mut self, n: usize) -> usize {
        self.rng.random_range(0..n)
    }

    /// In-place Fisher–Yates shuffle.
    pub(crate) fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
