use rand::rngs::SmallRng;
use rand::{Rng as _, SeedableRng};

/// The one random source threaded through every generation step.
#[derive(Clone, Debug)]
pub struct LabRng(SmallRng);

impl LabRng {
    pub fn new(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(SmallRng::from_entropy())
    }

    /// Fair Bernoulli draw.
    pub fn coin(&mut self) -> bool {
        self.0.gen()
    }

    pub fn range(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        self.0.gen_range(min..max)
    }

    /// Uniform pick in `0..n` that is never `exclude`. Needs `n >= 2`.
    pub fn pick_other(&mut self, n: usize, exclude: usize) -> usize {
        let pick = self.range(0, n.saturating_sub(1));
        if pick >= exclude {
            pick + 1
        } else {
            pick
        }
    }
}
