use crate::domain::ports::JitterSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Unseeded jitter from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngJitter;

impl JitterSource for ThreadRngJitter {
    fn jitter(&self, max: i32) -> i32 {
        let max = max.abs();
        rand::thread_rng().gen_range(-max..=max)
    }
}

/// Reproducible jitter for pinned runs (`--seed`).
#[derive(Debug)]
pub struct SeededJitter {
    rng: Mutex<StdRng>,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl JitterSource for SeededJitter {
    fn jitter(&self, max: i32) -> i32 {
        let max = max.abs();
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(-max..=max),
            // a poisoned lock still holds a usable generator
            Err(poisoned) => poisoned.into_inner().gen_range(-max..=max),
        }
    }
}

/// Constant offset, clamped to the requested bound.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub i32);

impl JitterSource for FixedJitter {
    fn jitter(&self, max: i32) -> i32 {
        let max = max.abs();
        self.0.clamp(-max, max)
    }
}
