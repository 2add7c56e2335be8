use fastrand::Rng;

use crate::space::{SpaceInfo, SpaceTypeBounds};
use crate::{Env, EnvError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MountainCarObservation {
    pub position: f64,
    pub velocity: f64,
}

impl MountainCarObservation {
    pub fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }
}

impl From<MountainCarObservation> for Vec<f64> {
    fn from(obs: MountainCarObservation) -> Self {
        vec![obs.position, obs.velocity]
    }
}

#[derive(Debug, Clone)]
pub struct MountainCarEnv {
    ready: bool,
    max_steps: u128,
    curr_step: u128,
    state: MountainCarObservation,
    rng: Rng,
}

impl MountainCarEnv {
    pub const ACTIONS: [&'static str; 3] = [
        "ACCELERATE TO THE LEFT",
        "DONT ACCELERATE",
        "ACCELERATE TO THE RIGHT",
    ];
    pub const MIN_POSITION: f64 = -1.2;
    pub const MAX_POSITION: f64 = 0.6;
    pub const MAX_SPEED: f64 = 0.07;
    const GOAL_POSITION: f64 = 0.5;
    const GOAL_VELOCITY: f64 = 0.0;
    const FORCE: f64 = 0.001;
    const GRAVITY: f64 = 0.0025;

    pub fn new(max_steps: u128, seed: u64) -> Self {
        let mut env = Self {
            ready: false,
            curr_step: 0,
            max_steps,
            state: MountainCarObservation::default(),
            rng: Rng::with_seed(seed),
        };
        env.state = env.initialize_car();
        env
    }

    fn initialize_car(&mut self) -> MountainCarObservation {
        MountainCarObservation {
            position: -0.6 + 0.2 * self.rng.f64(),
            velocity: 0.0,
        }
    }
}

impl Default for MountainCarEnv {
    fn default() -> Self {
        Self::new(500, 0)
    }
}

impl Env<MountainCarObservation> for MountainCarEnv {
    fn reset(&mut self) -> Result<MountainCarObservation, EnvError> {
        self.state = self.initialize_car();
        self.ready = true;
        self.curr_step = 0;
        Ok(self.state.clone())
    }

    fn step(&mut self, action: usize) -> Result<(MountainCarObservation, f64, bool), EnvError> {
        if !self.ready {
            return Err(EnvError::EnvNotReady);
        }
        if action >= Self::ACTIONS.len() {
            return Err(EnvError::InvalidAction);
        }
        if self.curr_step >= self.max_steps {
            self.ready = false;
            return Ok((self.state.clone(), -1.0, true));
        }
        self.curr_step += 1;

        self.state.velocity += (action as f64 - 1.0) * Self::FORCE
            + (3.0 * self.state.position).cos() * (-Self::GRAVITY);
        self.state.velocity = self.state.velocity.clamp(-Self::MAX_SPEED, Self::MAX_SPEED);
        self.state.position += self.state.velocity;
        self.state.position = self
            .state
            .position
            .clamp(Self::MIN_POSITION, Self::MAX_POSITION);
        if self.state.position == Self::MIN_POSITION && self.state.velocity < 0.0 {
            self.state.velocity = 0.0;
        }
        let terminated = self.state.position >= Self::GOAL_POSITION
            && self.state.velocity >= Self::GOAL_VELOCITY;
        if terminated {
            self.ready = false;
        }
        Ok((self.state.clone(), -1.0, terminated))
    }

    fn observation_space(&self) -> SpaceInfo {
        SpaceInfo::new(vec![
            SpaceTypeBounds::Continuous(Self::MIN_POSITION, Self::MAX_POSITION),
            SpaceTypeBounds::Continuous(-Self::MAX_SPEED, Self::MAX_SPEED),
        ])
    }

    fn action_space(&self) -> SpaceInfo {
        SpaceInfo::new(vec![SpaceTypeBounds::Discrete(3)])
    }

    fn render(&self) -> String {
        format!(
            "position {:.4} velocity {:.4}",
            self.state.position, self.state.velocity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_samples_inside_start_band() {
        let mut env = MountainCarEnv::new(500, 7);
        for _ in 0..20 {
            let obs = env.reset().unwrap();
            assert!(obs.position >= -0.6 && obs.position <= -0.4);
            assert_eq!(obs.velocity, 0.0);
        }
    }

    #[test]
    fn same_seed_same_trajectory() {
        let mut a = MountainCarEnv::new(500, 3);
        let mut b = MountainCarEnv::new(500, 3);
        assert_eq!(a.reset().unwrap(), b.reset().unwrap());
        for action in [0, 2, 1, 2, 0] {
            assert_eq!(a.step(action).unwrap(), b.step(action).unwrap());
        }
    }

    #[test]
    fn observations_stay_inside_declared_bounds() {
        let mut env = MountainCarEnv::new(500, 11);
        env.reset().unwrap();
        for i in 0..200 {
            let (obs, reward, terminated) = env.step(i % 3).unwrap();
            assert!(obs.position >= MountainCarEnv::MIN_POSITION);
            assert!(obs.position <= MountainCarEnv::MAX_POSITION);
            assert!(obs.velocity.abs() <= MountainCarEnv::MAX_SPEED);
            assert_eq!(reward, -1.0);
            if terminated {
                break;
            }
        }
    }
}
