//! Seed-keyed deterministic draws.
//!
//! Every stochastic decision constructs its own generator from a string
//! seed key immediately before the draw it protects. No generator state is
//! shared between decisions, so reordering independent decisions never
//! changes their individual outcomes, and identical keys always reproduce
//! identical draws across runs.

use std::hash::Hasher;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;

use crate::scene::SceneEntity;

/// A single-decision random source derived from a seed key.
///
/// ChaCha8 keeps the stream quality high while staying cheap to construct;
/// FxHasher gives a stable key hash independent of the std hasher's
/// per-process randomization.
#[derive(Clone, Debug)]
pub struct DrawRng {
    inner: ChaCha8Rng,
}

impl DrawRng {
    /// Derive a generator from a seed key.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write(key.as_bytes());
        Self {
            inner: ChaCha8Rng::seed_from_u64(hasher.finish()),
        }
    }

    /// A uniform draw in `[0, 100)`.
    pub fn percent(&mut self) -> i64 {
        self.inner.gen_range(0..100)
    }

    /// The percentage gate: proceed iff a uniform draw lands under the
    /// threshold.
    pub fn chance(&mut self, threshold: i64) -> bool {
        self.percent() < threshold
    }

    /// A uniform integer in `[low, high]`, inclusive on both ends.
    pub fn int_range(&mut self, low: i64, high: i64) -> i64 {
        if low >= high {
            return low;
        }
        self.inner.gen_range(low..=high)
    }

    /// A uniform float in `[low, high)`.
    pub fn float_range(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.inner.gen_range(low..high)
    }

    /// A uniform draw in `[0, n)`.
    pub fn index(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        self.inner.gen_range(0..n)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            None
        } else {
            slice.get(self.index(slice.len()))
        }
    }
}

/// Seed key for a decision tied to an entity's identity.
///
/// The key folds in a fixed per-feature salt, the author-supplied token, and
/// the entity's name, position, and orientation, so the same entity always
/// resolves the same way while distinct entities diverge.
#[must_use]
pub fn entity_seed(salt: &str, token: &str, ent: &SceneEntity) -> String {
    format!(
        "{}_{}:{}_{}_{}",
        salt,
        token,
        ent.get("targetname", ""),
        ent.get("origin", ""),
        ent.get("angles", ""),
    )
}

/// Seed key for an identity-less global decision, folded from the
/// process-wide map seed instead of an entity.
#[must_use]
pub fn global_seed(salt: &str, token: &str, map_seed: &str) -> String {
    format!("{map_seed}_{salt}_{token}")
}
