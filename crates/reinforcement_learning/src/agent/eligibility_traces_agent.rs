use std::fmt::Debug;
use std::hash::Hash;

use fxhash::FxHashMap;
use ndarray::{Array, Array1};
use utils::argmax;

use super::{DiscreteAgent, GetNextQValue};
use crate::action_selection::ActionSelection;
use crate::error::{Error, Result};

// Tabular TD(λ) control with accumulating traces. Visited state-action
// pairs keep a decaying eligibility, so one TD error propagates credit over
// the whole recent trajectory. Traces are dropped at episode boundaries.
pub struct EligibilityTracesAgent<T: Hash + Eq + Clone + Debug> {
    action_selection: Box<dyn ActionSelection>,
    next_value_function: GetNextQValue,
    learning_rate: f64,
    discount_factor: f64,
    lambda_factor: f64,
    default_values: Array1<f64>,
    trace: Vec<(T, Array1<f64>)>,
    policy: FxHashMap<T, Array1<f64>>,
}

impl<T: Hash + Eq + Clone + Debug> EligibilityTracesAgent<T> {
    pub fn new(
        action_selection: Box<dyn ActionSelection>,
        next_value_function: GetNextQValue,
        learning_rate: f64,
        discount_factor: f64,
        lambda_factor: f64,
        n_actions: usize,
    ) -> Result<Self> {
        if !(learning_rate > 0.0 && learning_rate <= 1.0) {
            return Err(Error::invalid_config("step size must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&discount_factor) {
            return Err(Error::invalid_config("discount rate must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&lambda_factor) {
            return Err(Error::invalid_config("lambda must be in [0, 1]"));
        }
        if n_actions < 1 {
            return Err(Error::invalid_config("at least one action is required"));
        }
        Ok(Self {
            action_selection,
            next_value_function,
            learning_rate,
            discount_factor,
            lambda_factor,
            default_values: Array::from_elem((n_actions,), 0.0),
            trace: Vec::default(),
            policy: FxHashMap::default(),
        })
    }

    pub fn q_values(&self, obs: &T) -> &Array1<f64> {
        self.policy.get(obs).unwrap_or(&self.default_values)
    }

    pub fn trace_len(&self) -> usize {
        self.trace.len()
    }
}

impl<T: Hash + Eq + Clone + Debug> DiscreteAgent<T> for EligibilityTracesAgent<T> {
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

        if !self.trace.iter().any(|(obs, _)| obs == curr_obs) {
            self.trace
                .push((curr_obs.clone(), self.default_values.clone()));
        }

        let decay = self.discount_factor * self.lambda_factor;
        for (obs, trace_values) in self.trace.iter_mut() {
            if obs == curr_obs {
                trace_values[curr_action] += 1.0;
            }
            let policy_values = self
                .policy
                .entry(obs.clone())
                .or_insert_with(|| self.default_values.clone());
            for (action, eligibility) in trace_values.iter_mut().enumerate() {
                policy_values[action] += self.learning_rate * temporal_difference * *eligibility;
                *eligibility *= decay;
            }
        }

        if terminated {
            self.trace.clear();
        }
        Ok(temporal_difference)
    }

    fn reset(&mut self) {
        self.policy = FxHashMap::default();
        self.trace.clear();
        self.action_selection.reset();
    }
}
