mod dyna_agent;
mod eligibility_traces_agent;
mod gradient_descent_agent;
mod one_step_agent;

use std::fmt::Debug;

use ndarray::Array1;

pub use dyna_agent::DynaAgent;
pub use eligibility_traces_agent::EligibilityTracesAgent;
pub use gradient_descent_agent::{GradientDescentAgent, TraceResetStrategy};
pub use one_step_agent::OneStepAgent;

use crate::error::Result;
use utils::max;

// How much the successor state is worth under the learning policy. Plugged
// into the tabular agents as a plain function, one per algorithm.
pub type GetNextQValue = fn(&Array1<f64>, usize, &Array1<f64>) -> f64;

pub fn sarsa(next_q_values: &Array1<f64>, next_action: usize, _policy_probs: &Array1<f64>) -> f64 {
    next_q_values[next_action]
}

pub fn qlearning(
    next_q_values: &Array1<f64>,
    _next_action: usize,
    _policy_probs: &Array1<f64>,
) -> f64 {
    max(next_q_values.iter().copied())
}

pub fn expected_sarsa(
    next_q_values: &Array1<f64>,
    _next_action: usize,
    policy_probs: &Array1<f64>,
) -> f64 {
    next_q_values
        .iter()
        .zip(policy_probs.iter())
        .map(|(q, p)| q * p)
        .sum()
}

// Learner over finite, hashable observations.
pub trait DiscreteAgent<T: Clone + Debug> {
    fn get_action(&mut self, obs: &T) -> usize;

    fn get_best_action(&mut self, obs: &T) -> usize;

    fn update(
        &mut self,
        curr_obs: &T,
        curr_action: usize,
        reward: f64,
        terminated: bool,
        next_obs: &T,
        next_action: usize,
    ) -> Result<f64>;

    fn reset(&mut self);
}

// Learner over continuous observations, fed through a tile coder.
pub trait ContinuousAgent {
    fn get_action(&mut self, obs: &[f64]) -> Result<usize>;

    fn get_best_action(&mut self, obs: &[f64]) -> Result<usize>;

    fn action_values(&self, obs: &[f64]) -> Result<Array1<f64>>;

    fn update(
        &mut self,
        curr_obs: &[f64],
        curr_action: usize,
        reward: f64,
        terminated: bool,
        next_obs: &[f64],
        next_action: usize,
    ) -> Result<f64>;

    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn future_value_functions() {
        let next_q = array![1.0, 5.0, 3.0];
        let probs = array![0.5, 0.25, 0.25];
        assert_eq!(sarsa(&next_q, 2, &probs), 3.0);
        assert_eq!(qlearning(&next_q, 2, &probs), 5.0);
        assert_eq!(expected_sarsa(&next_q, 2, &probs), 0.5 + 1.25 + 0.75);
    }
}
