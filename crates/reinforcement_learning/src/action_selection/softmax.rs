use ndarray::Array1;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use utils::categorical_sample;

use super::ActionSelection;
use crate::error::{Error, Result};

// Boltzmann exploration: actions are drawn proportionally to exp(Q / T).
// The max is subtracted before exponentiating; if the exponential mass still
// vanishes the distribution degrades to uniform.
pub struct Softmax {
    temperature: f64,
    rng: SmallRng,
}

impl Softmax {
    pub fn new(temperature: f64, seed: u64) -> Result<Self> {
        if !(temperature > 0.0) || !temperature.is_finite() {
            return Err(Error::invalid_config(
                "temperature must be positive and finite",
            ));
        }
        Ok(Self {
            temperature,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    fn probabilities(&self, values: &Array1<f64>) -> Vec<f64> {
        let max = values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        let mut probs: Vec<f64> = values
            .iter()
            .map(|&q| ((q - max) / self.temperature).exp())
            .collect();
        let total: f64 = probs.iter().sum();
        if total > 0.0 && total.is_finite() {
            for p in probs.iter_mut() {
                *p /= total;
            }
        } else {
            probs.fill(1.0 / values.len() as f64);
        }
        probs
    }
}

impl ActionSelection for Softmax {
    fn get_action(&mut self, values: &Array1<f64>) -> usize {
        let probs = self.probabilities(values);
        categorical_sample(&probs, self.rng.gen_range(0.0..1.0))
    }

    fn get_exploration_probs(&self, values: &Array1<f64>) -> Array1<f64> {
        Array1::from_vec(self.probabilities(values))
    }

    fn reset(&mut self) {}
}
