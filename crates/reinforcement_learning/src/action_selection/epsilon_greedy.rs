use ndarray::{Array, Array1};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use utils::argmax;

use super::ActionSelection;
use crate::error::{Error, Result};

pub struct EpsilonGreedy {
    epsilon: f64,
    rng: SmallRng,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64, seed: u64) -> Result<Self> {
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(Error::invalid_config("epsilon must be in [0, 1]"));
        }
        Ok(Self {
            epsilon,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    fn should_explore(&mut self) -> bool {
        self.epsilon != 0.0 && self.rng.gen_range(0.0..1.0) < self.epsilon
    }
}

impl ActionSelection for EpsilonGreedy {
    fn get_action(&mut self, values: &Array1<f64>) -> usize {
        if self.should_explore() {
            self.rng.gen_range(0..values.len())
        } else {
            argmax(values.iter())
        }
    }

    fn get_exploration_probs(&self, values: &Array1<f64>) -> Array1<f64> {
        let mut probs: Array1<f64> =
            Array::from_elem((values.len(),), self.epsilon / values.len() as f64);
        probs[argmax(values.iter())] += 1.0 - self.epsilon;
        probs
    }

    fn reset(&mut self) {}
}
