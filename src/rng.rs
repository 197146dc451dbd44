//! The shared randomness capability.
//!
//! Every random decision in a run (tie-breaks, shuffles, weighted draws, random
//! seeds and cached priorities) is drawn from one `Entropy` handle. Clones share
//! the same generator, so the call sequence, and therefore the output, is fixed
//! once the seed is fixed.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A cloneable handle to a single shared pseudo-random generator.
#[derive(Clone)]
pub struct Entropy {
    rng: Rc<RefCell<Box<dyn RngCore>>>,
}

impl Entropy {
    /// Creates a handle around a `StdRng` seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Creates a handle seeded from the operating system.
    pub fn from_os() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Wraps any generator, e.g. a deterministic mock in tests.
    pub fn from_rng<R: RngCore + 'static>(rng: R) -> Self {
        Self {
            rng: Rc::new(RefCell::new(Box::new(rng))),
        }
    }

    /// Uniform draw from `[0, 1)`.
    pub fn uniform(&self) -> f64 {
        self.rng.borrow_mut().gen::<f64>()
    }

    /// Uniform draw from `0..n`.
    ///
    /// # Panics
    /// Panics if `n == 0`.
    pub fn below(&self, n: usize) -> usize {
        assert!(n > 0, "cannot draw from an empty range");
        self.rng.borrow_mut().gen_range(0..n)
    }

    /// Picks one element uniformly, or `None` for an empty slice.
    pub fn choose<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut *self.rng.borrow_mut())
    }

    /// Shuffles `items` in place.
    pub fn shuffle<T>(&self, items: &mut [T]) {
        let mut rng = self.rng.borrow_mut();
        items.shuffle(&mut *rng);
    }
}

impl fmt::Debug for Entropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entropy")
            .field("handles", &Rc::strong_count(&self.rng))
            .finish()
    }
}
