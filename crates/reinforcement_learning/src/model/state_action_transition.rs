use std::hash::Hash;

use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::error::{Error, Result};

// Learned next-state distribution of one (state, action) pair. Every update
// pushes the observed successor's frequency toward 1 and decays all others,
// so a deterministic transition converges to frequency 1. Insertion order is
// the iteration order (IndexMap), which keeps the weighted sampling walk
// reproducible for a fixed seed.
#[derive(Debug, Clone)]
pub struct StateActionTransition<S: Hash + Eq + Clone> {
    frequency: IndexMap<S, f64, FxBuildHasher>,
    reward: IndexMap<S, f64, FxBuildHasher>,
    greedy: f64,
    step_size: f64,
    rng: SmallRng,
}

impl<S: Hash + Eq + Clone> StateActionTransition<S> {
    // `greedy` gates the sampling: 1.0 always follows the learned
    // likelihoods, 0.0 ignores them. `step_size` trades model accuracy for
    // adaptation speed; 1.0 forgets everything but the latest successor.
    pub fn new(greedy: f64, step_size: f64, seed: u64) -> Result<Self> {
        if !(0.0..=1.0).contains(&greedy) {
            return Err(Error::invalid_config("greediness must be in [0, 1]"));
        }
        if !(step_size > 0.0 && step_size <= 1.0) {
            return Err(Error::invalid_config("model step size must be in (0, 1]"));
        }
        Ok(Self {
            frequency: IndexMap::default(),
            reward: IndexMap::default(),
            greedy,
            step_size,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn update(&mut self, next_state: S, reward: f64) {
        if !self.frequency.contains_key(&next_state) {
            self.frequency.insert(next_state.clone(), 0.0);
            self.reward.insert(next_state.clone(), 0.0);
        }

        for (state, frequency) in self.frequency.iter_mut() {
            if *state != next_state {
                *frequency += self.step_size * (0.0 - *frequency);
            }
        }
        let frequency = self.frequency.get_mut(&next_state).unwrap();
        *frequency += self.step_size * (1.0 - *frequency);

        // Reward tracking always overwrites toward the latest observation.
        *self.reward.get_mut(&next_state).unwrap() = reward;

        debug_assert_eq!(self.frequency.len(), self.reward.len());
    }

    pub fn get_next_state(&mut self) -> Result<&S> {
        if self.frequency.is_empty() {
            return Err(Error::ModelEmpty);
        }

        if self.rng.gen_range(0.0..1.0) > self.greedy {
            let index = self.rng.gen_range(0..self.frequency.len());
            return Ok(self.frequency.get_index(index).unwrap().0);
        }

        let total: f64 = self.frequency.values().sum();
        if !(total > 0.0) {
            let index = self.rng.gen_range(0..self.frequency.len());
            return Ok(self.frequency.get_index(index).unwrap().0);
        }
        let mut remaining = self.rng.gen_range(0.0..total);
        for (state, &frequency) in self.frequency.iter() {
            if frequency > remaining {
                return Ok(state);
            }
            remaining -= frequency;
        }
        // Floating point slack: the walk exhausted the mass.
        Ok(self.frequency.get_index(self.frequency.len() - 1).unwrap().0)
    }

    pub fn get_reward(&self, state: &S) -> Result<f64> {
        self.reward.get(state).copied().ok_or(Error::ModelMissingKey)
    }

    pub fn frequency_of(&self, state: &S) -> Option<f64> {
        self.frequency.get(state).copied()
    }

    pub fn len(&self) -> usize {
        self.frequency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequency.is_empty()
    }

    pub fn greedy(&self) -> f64 {
        self.greedy
    }

    pub fn set_greedy(&mut self, greedy: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&greedy) {
            return Err(Error::invalid_config("greediness must be in [0, 1]"));
        }
        self.greedy = greedy;
        Ok(())
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn set_step_size(&mut self, step_size: f64) -> Result<()> {
        if !(step_size > 0.0 && step_size <= 1.0) {
            return Err(Error::invalid_config("model step size must be in (0, 1]"));
        }
        self.step_size = step_size;
        Ok(())
    }
}
