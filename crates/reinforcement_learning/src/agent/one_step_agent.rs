use std::fmt::Debug;
use std::hash::Hash;

use fxhash::FxHashMap;
use ndarray::{Array, Array1};
use utils::argmax;

use super::{DiscreteAgent, GetNextQValue};
use crate::action_selection::ActionSelection;
use crate::error::{Error, Result};

// Tabular TD(0) control. The future-value function decides the algorithm:
// `sarsa` for on-policy, `qlearning` for off-policy, `expected_sarsa` for
// the expectation under the exploration probabilities.
pub struct OneStepAgent<T: Hash + Eq + Clone + Debug> {
    action_selection: Box<dyn ActionSelection>,
    next_value_function: GetNextQValue,
    learning_rate: f64,
    discount_factor: f64,
    default_values: Array1<f64>,
    policy: FxHashMap<T, Array1<f64>>,
}

impl<T: Hash + Eq + Clone + Debug> OneStepAgent<T> {
    pub fn new(
        action_selection: Box<dyn ActionSelection>,
        next_value_function: GetNextQValue,
        learning_rate: f64,
        discount_factor: f64,
        n_actions: usize,
    ) -> Result<Self> {
        if !(learning_rate > 0.0 && learning_rate <= 1.0) {
            return Err(Error::invalid_config("step size must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&discount_factor) {
            return Err(Error::invalid_config("discount rate must be in [0, 1]"));
        }
        if n_actions < 1 {
            return Err(Error::invalid_config("at least one action is required"));
        }
        Ok(Self {
            action_selection,
            next_value_function,
            learning_rate,
            discount_factor,
            default_values: Array::from_elem((n_actions,), 0.0),
            policy: FxHashMap::default(),
        })
    }

    pub fn q_values(&self, obs: &T) -> &Array1<f64> {
        self.policy.get(obs).unwrap_or(&self.default_values)
    }
}

impl<T: Hash + Eq + Clone + Debug> DiscreteAgent<T> for OneStepAgent<T> {
    fn get_action(&mut self, obs: &T) -> usize {
        let values = self.policy.get(obs).unwrap_or(&self.default_values).clone();
        self.action_selection.get_action(&values)
    }

    fn get_best_action(&mut self, obs: &T) -> usize {
        argmax(self.q_values(obs).iter())
    }

    fn update(
        &mut self,
        curr_obs: &T,
        curr_action: usize,
        reward: f64,
        terminated: bool,
        next_obs: &T,
        next_action: usize,
    ) -> Result<f64> {
        let next_q_values = self.policy.get(next_obs).unwrap_or(&self.default_values);
        let future_q_value = (self.next_value_function)(
            next_q_values,
            next_action,
            &self.action_selection.get_exploration_probs(next_q_values),
        );
        let curr_q_values = self.policy.get(curr_obs).unwrap_or(&self.default_values);
        let temporal_difference = reward
            + if terminated {
                0.0
            } else {
                self.discount_factor * future_q_value
            }
            - curr_q_values[curr_action];
        if !temporal_difference.is_finite() {
            return Err(Error::Numeric {
                what: "temporal difference",
            });
        }

        let values = self
            .policy
            .entry(curr_obs.clone())
            .or_insert_with(|| self.default_values.clone());
        values[curr_action] += self.learning_rate * temporal_difference;

        Ok(temporal_difference)
    }

    fn reset(&mut self) {
        self.policy = FxHashMap::default();
        self.action_selection.reset();
    }
}
