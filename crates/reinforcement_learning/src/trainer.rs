use std::fmt::Debug;

use environments::space::SpaceType;
use environments::Env;
use tracing::info;

use crate::agent::{ContinuousAgent, DiscreteAgent};
use crate::error::Result;

// (training rewards, training lengths, training TD errors,
//  evaluation rewards, evaluation lengths)
pub type TrainResults = (Vec<f64>, Vec<u128>, Vec<f64>, Vec<f64>, Vec<f64>);

pub struct DiscreteTrainer<T: Clone + Debug> {
    env: Box<dyn Env<T>>,
    pub early_stop: Option<Box<dyn Fn(f64) -> bool>>,
}

impl<T: Clone + Debug> DiscreteTrainer<T> {
    pub fn new(env: Box<dyn Env<T>>) -> Self {
        if env.observation_space().get_type() != SpaceType::Discrete {
            panic!("observation space must be discrete");
        }
        if env.action_space().get_type() != SpaceType::Discrete {
            panic!("action space must be discrete");
        }
        Self {
            env,
            early_stop: None,
        }
    }

    pub fn train(
        &mut self,
        agent: &mut dyn DiscreteAgent<T>,
        n_episodes: u128,
        eval_at: u128,
        eval_for: u128,
    ) -> Result<TrainResults> {
        let mut training_reward: Vec<f64> = vec![];
        let mut training_length: Vec<u128> = vec![];
        let mut training_error: Vec<f64> = vec![];
        let mut evaluation_reward: Vec<f64> = vec![];
        let mut evaluation_length: Vec<f64> = vec![];

        for episode in 0..n_episodes {
            let mut action_counter: u128 = 0;
            let mut epi_reward: f64 = 0.0;
            let mut curr_obs: T = self.env.reset()?;
            let mut curr_action: usize = agent.get_action(&curr_obs);

            loop {
                action_counter += 1;
                let (next_obs, reward, terminated) = self.env.step(curr_action)?;
                let next_action: usize = agent.get_action(&next_obs);
                let td = agent.update(
                    &curr_obs,
                    curr_action,
                    reward,
                    terminated,
                    &next_obs,
                    next_action,
                )?;
                training_error.push(td);
                curr_obs = next_obs;
                curr_action = next_action;
                epi_reward += reward;
                if terminated {
                    training_reward.push(epi_reward);
                    break;
                }
            }
            training_length.push(action_counter);

            if eval_at > 0 && episode % eval_at == 0 {
                let (rewards, lengths) = self.evaluate(agent, eval_for)?;
                let mean_reward = rewards.iter().sum::<f64>() / rewards.len() as f64;
                let mean_length = lengths.iter().sum::<u128>() as f64 / lengths.len() as f64;
                info!(episode, mean_reward, mean_length, "evaluation");
                evaluation_reward.push(mean_reward);
                evaluation_length.push(mean_length);
                if let Some(stop) = &self.early_stop {
                    if stop(mean_reward) {
                        break;
                    }
                }
            }
        }
        Ok((
            training_reward,
            training_length,
            training_error,
            evaluation_reward,
            evaluation_length,
        ))
    }

    pub fn evaluate(
        &mut self,
        agent: &mut dyn DiscreteAgent<T>,
        n_episodes: u128,
    ) -> Result<(Vec<f64>, Vec<u128>)> {
        let mut reward_history: Vec<f64> = vec![];
        let mut episode_length: Vec<u128> = vec![];
        for _episode in 0..n_episodes {
            let mut action_counter: u128 = 0;
            let mut epi_reward: f64 = 0.0;
            let mut curr_obs: T = self.env.reset()?;
            loop {
                action_counter += 1;
                let curr_action = agent.get_best_action(&curr_obs);
                let (next_obs, reward, terminated) = self.env.step(curr_action)?;
                curr_obs = next_obs;
                epi_reward += reward;
                if terminated {
                    break;
                }
            }
            reward_history.push(epi_reward);
            episode_length.push(action_counter);
        }
        Ok((reward_history, episode_length))
    }
}

pub struct ContinuousTrainer<T: Clone + Into<Vec<f64>>> {
    env: Box<dyn Env<T>>,
    pub early_stop: Option<Box<dyn Fn(f64) -> bool>>,
}

impl<T: Clone + Into<Vec<f64>>> ContinuousTrainer<T> {
    pub fn new(env: Box<dyn Env<T>>) -> Self {
        if env.observation_space().get_type() != SpaceType::Continuous {
            panic!("observation space must be continuous");
        }
        if env.action_space().get_type() != SpaceType::Discrete {
            panic!("action space must be discrete");
        }
        Self {
            env,
            early_stop: None,
        }
    }

    pub fn train(
        &mut self,
        agent: &mut dyn ContinuousAgent,
        n_episodes: u128,
        eval_at: u128,
        eval_for: u128,
    ) -> Result<TrainResults> {
        let mut training_reward: Vec<f64> = vec![];
        let mut training_length: Vec<u128> = vec![];
        let mut training_error: Vec<f64> = vec![];
        let mut evaluation_reward: Vec<f64> = vec![];
        let mut evaluation_length: Vec<f64> = vec![];

        for episode in 0..n_episodes {
            let mut action_counter: u128 = 0;
            let mut epi_reward: f64 = 0.0;
            let mut curr_obs: Vec<f64> = self.env.reset()?.into();
            let mut curr_action: usize = agent.get_action(&curr_obs)?;

            loop {
                action_counter += 1;
                let (next_obs, reward, terminated) = self.env.step(curr_action)?;
                let next_obs: Vec<f64> = next_obs.into();
                let next_action: usize = agent.get_action(&next_obs)?;
                let td = agent.update(
                    &curr_obs,
                    curr_action,
                    reward,
                    terminated,
                    &next_obs,
                    next_action,
                )?;
                training_error.push(td);
                curr_obs = next_obs;
                curr_action = next_action;
                epi_reward += reward;
                if terminated {
                    training_reward.push(epi_reward);
                    break;
                }
            }
            training_length.push(action_counter);

            if eval_at > 0 && episode % eval_at == 0 {
                let (rewards, lengths) = self.evaluate(agent, eval_for)?;
                let mean_reward = rewards.iter().sum::<f64>() / rewards.len() as f64;
                let mean_length = lengths.iter().sum::<u128>() as f64 / lengths.len() as f64;
                info!(episode, mean_reward, mean_length, "evaluation");
                evaluation_reward.push(mean_reward);
                evaluation_length.push(mean_length);
                if let Some(stop) = &self.early_stop {
                    if stop(mean_reward) {
                        break;
                    }
                }
            }
        }
        Ok((
            training_reward,
            training_length,
            training_error,
            evaluation_reward,
            evaluation_length,
        ))
    }

    pub fn evaluate(
        &mut self,
        agent: &mut dyn ContinuousAgent,
        n_episodes: u128,
    ) -> Result<(Vec<f64>, Vec<u128>)> {
        let mut reward_history: Vec<f64> = vec![];
        let mut episode_length: Vec<u128> = vec![];
        for _episode in 0..n_episodes {
            let mut action_counter: u128 = 0;
            let mut epi_reward: f64 = 0.0;
            let mut curr_obs: Vec<f64> = self.env.reset()?.into();
            loop {
                action_counter += 1;
                let curr_action = agent.get_best_action(&curr_obs)?;
                let (next_obs, reward, terminated) = self.env.step(curr_action)?;
                curr_obs = next_obs.into();
                epi_reward += reward;
                if terminated {
                    break;
                }
            }
            reward_history.push(epi_reward);
            episode_length.push(action_counter);
        }
        Ok((reward_history, episode_length))
    }
}
