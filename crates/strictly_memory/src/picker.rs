//! Random selection primitives used to lay out the board.
//!
//! Both operations copy their input; the caller's sequence is never
//! reordered. Seeded pickers are fully deterministic, which the tests and
//! the `--seed` flag of the terminal game rely on.

use crate::error::{MemoryError, MemoryErrorKind, MemoryResult};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

/// Shuffle and sample-without-replacement over a ChaCha8 stream.
#[derive(Clone, Debug)]
pub struct RandomPicker {
    rng: ChaCha8Rng,
}

impl RandomPicker {
    /// Creates a deterministic picker from a seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a picker seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Returns a uniformly random permutation of `items`.
    ///
    /// Fisher–Yates: walking from the last index down to 1, each slot is
    /// swapped with a uniformly chosen slot in `[0, i]`.
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut shuffled = items.to_vec();
        for i in (1..shuffled.len()).rev() {
            let j = self.rng.gen_range(0..=i);
            shuffled.swap(i, j);
        }
        shuffled
    }

    /// Draws `count` elements at distinct positions of `items`, in draw order.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryErrorKind::InvalidArgument`] if `count` exceeds
    /// `items.len()`.
    #[instrument(skip(self, items), fields(available = items.len()))]
    pub fn pick_without_replacement<T: Clone>(
        &mut self,
        items: &[T],
        count: usize,
    ) -> MemoryResult<Vec<T>> {
        if count > items.len() {
            debug!("Pick count exceeds source length");
            return Err(MemoryError::new(MemoryErrorKind::InvalidArgument {
                requested: count,
                available: items.len(),
            }));
        }

        let mut remaining = items.to_vec();
        let mut picks = Vec::with_capacity(count);
        for _ in 0..count {
            let index = self.rng.gen_range(0..remaining.len());
            picks.push(remaining.remove(index));
        }
        Ok(picks)
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::from_entropy()
    }
}
