use std::fmt::Debug;
use std::hash::Hash;

use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use tracing::debug;

use super::DiscreteAgent;
use crate::error::{Error, Result};
use crate::model::StateActionTransition;

// Dyna: every real transition also feeds a learned model of the
// environment, and each real update is followed by `planning_steps`
// simulated updates drawn from that model. The transition table iterates in
// insertion order, so a seeded run replays exactly.
pub struct DynaAgent<T: Hash + Eq + Clone + Debug> {
    agent: Box<dyn DiscreteAgent<T>>,
    model: IndexMap<(T, usize), StateActionTransition<T>, FxBuildHasher>,
    planning_steps: usize,
    transition_greediness: f64,
    transition_step_size: f64,
    rng: SmallRng,
}

impl<T: Hash + Eq + Clone + Debug> DynaAgent<T> {
    pub fn new(
        agent: Box<dyn DiscreteAgent<T>>,
        planning_steps: usize,
        transition_greediness: f64,
        transition_step_size: f64,
        seed: u64,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&transition_greediness) {
            return Err(Error::invalid_config("greediness must be in [0, 1]"));
        }
        if !(transition_step_size > 0.0 && transition_step_size <= 1.0) {
            return Err(Error::invalid_config("model step size must be in (0, 1]"));
        }
        Ok(Self {
            agent,
            model: IndexMap::default(),
            planning_steps,
            transition_greediness,
            transition_step_size,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn model_len(&self) -> usize {
        self.model.len()
    }

    pub fn planning_steps(&self) -> usize {
        self.planning_steps
    }

    fn plan(&mut self) -> Result<()> {
        for _ in 0..self.planning_steps {
            if self.model.is_empty() {
                break;
            }
            let index = self.rng.gen_range(0..self.model.len());
            let (sim_obs, sim_action, sim_next_obs, sim_reward) = {
                let ((obs, action), transition) = self.model.get_index_mut(index).unwrap();
                let sim_next_obs = match transition.get_next_state() {
                    Ok(next) => next.clone(),
                    Err(Error::ModelEmpty) => {
                        debug!("planning skipped an unpopulated transition");
                        continue;
                    }
                    Err(err) => return Err(err),
                };
                let sim_reward = transition.get_reward(&sim_next_obs)?;
                (obs.clone(), *action, sim_next_obs, sim_reward)
            };
            let sim_next_action = self.agent.get_action(&sim_next_obs);
            self.agent.update(
                &sim_obs,
                sim_action,
                sim_reward,
                false,
                &sim_next_obs,
                sim_next_action,
            )?;
        }
        Ok(())
    }
}

impl<T: Hash + Eq + Clone + Debug> DiscreteAgent<T> for DynaAgent<T> {
    fn get_action(&mut self, obs: &T) -> usize {
        self.agent.get_action(obs)
    }

    fn get_best_action(&mut self, obs: &T) -> usize {
        self.agent.get_best_action(obs)
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
        let temporal_difference = self.agent.update(
            curr_obs,
            curr_action,
            reward,
            terminated,
            next_obs,
            next_action,
        )?;

        let transition_seed = self.rng.gen();
        let transition = match self.model.entry((curr_obs.clone(), curr_action)) {
            indexmap::map::Entry::Occupied(entry) => entry.into_mut(),
            indexmap::map::Entry::Vacant(entry) => entry.insert(StateActionTransition::new(
                self.transition_greediness,
                self.transition_step_size,
                transition_seed,
            )?),
        };
        transition.update(next_obs.clone(), reward);

        self.plan()?;
        Ok(temporal_difference)
    }

    fn reset(&mut self) {
        self.agent.reset();
        self.model = IndexMap::default();
    }
}
