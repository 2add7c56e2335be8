use ndarray::Array1;
use utils::argmax;

use super::ContinuousAgent;
use crate::action_selection::ActionSelection;
use crate::coding::TileCode;
use crate::error::{Error, Result};
use crate::gradient_descent::GradientDescent;

// What happens to the eligibility trace when the incoming next action is
// not the greedy one. `Keep` is SARSA(λ); `ZeroOnExploratory` is Watkins's
// Q(λ), which truncates credit at the first off-greedy action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceResetStrategy {
    Keep,
    ZeroOnExploratory,
}

// Episode driver for the linear learners: actions are appended to the state
// as the last coder coordinate, so one weight vector covers every
// state-action pair.
pub struct GradientDescentAgent {
    action_selection: Box<dyn ActionSelection>,
    gradient_descent: GradientDescent,
    tile_code: Box<dyn TileCode>,
    n_actions: usize,
    trace_reset: TraceResetStrategy,
}

impl GradientDescentAgent {
    pub fn new(
        action_selection: Box<dyn ActionSelection>,
        tile_code: Box<dyn TileCode>,
        learning_rate: f64,
        discount_factor: f64,
        lambda_factor: f64,
        trace_reset: TraceResetStrategy,
        n_actions: usize,
    ) -> Result<Self> {
        if n_actions < 1 {
            return Err(Error::invalid_config("at least one action is required"));
        }
        if tile_code.dimension() < 2 {
            return Err(Error::invalid_config(
                "the coder needs a state dimension plus the action dimension",
            ));
        }
        Ok(Self {
            action_selection,
            gradient_descent: GradientDescent::new(
                learning_rate,
                discount_factor,
                lambda_factor,
            )?,
            tile_code,
            n_actions,
            trace_reset,
        })
    }

    pub fn gradient_descent(&self) -> &GradientDescent {
        &self.gradient_descent
    }

    fn state_action(&self, obs: &[f64], action: usize) -> Vec<f64> {
        let mut parameters = Vec::with_capacity(obs.len() + 1);
        parameters.extend_from_slice(obs);
        parameters.push(action as f64);
        parameters
    }

    fn features_of(&self, obs: &[f64], action: usize) -> Result<Vec<usize>> {
        self.tile_code.feature_vector(&self.state_action(obs, action))
    }
}

impl ContinuousAgent for GradientDescentAgent {
    fn get_action(&mut self, obs: &[f64]) -> Result<usize> {
        let values = self.action_values(obs)?;
        Ok(self.action_selection.get_action(&values))
    }

    fn get_best_action(&mut self, obs: &[f64]) -> Result<usize> {
        Ok(argmax(self.action_values(obs)?.iter()))
    }

    fn action_values(&self, obs: &[f64]) -> Result<Array1<f64>> {
        let mut values = Vec::with_capacity(self.n_actions);
        for action in 0..self.n_actions {
            values.push(
                self.tile_code
                    .value_from_parameters(&self.state_action(obs, action))?,
            );
        }
        Ok(Array1::from_vec(values))
    }

    fn update(
        &mut self,
        curr_obs: &[f64],
        curr_action: usize,
        reward: f64,
        terminated: bool,
        next_obs: &[f64],
        next_action: usize,
    ) -> Result<f64> {
        let features = self.features_of(curr_obs, curr_action)?;
        let next_features = if terminated {
            None
        } else {
            Some(self.features_of(next_obs, next_action)?)
        };

        if self.trace_reset == TraceResetStrategy::ZeroOnExploratory && !terminated {
            let next_values = self.action_values(next_obs)?;
            if next_action != argmax(next_values.iter()) {
                self.gradient_descent.reset();
            }
        }

        let temporal_difference = self.gradient_descent.update(
            &mut *self.tile_code,
            &features,
            reward,
            next_features.as_deref(),
        )?;

        if terminated {
            self.gradient_descent.reset();
        }
        Ok(temporal_difference)
    }

    fn reset(&mut self) {
        self.gradient_descent.reset();
        self.action_selection.reset();
    }
}
