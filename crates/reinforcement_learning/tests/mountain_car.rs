use environments::classic_control::MountainCarEnv;
use environments::Env;
use reinforcement_learning::action_selection::EpsilonGreedy;
use reinforcement_learning::agent::{GradientDescentAgent, TraceResetStrategy};
use reinforcement_learning::coding::{DimensionInfo, TileCode, TileCodeCorrect, TileCodeHashed};
use reinforcement_learning::trainer::ContinuousTrainer;

const N_ACTIONS: usize = 3;

// Observation axes from the environment's declared bounds, plus the action
// ordinal as the last coder axis.
fn coder_dimensions(env: &MountainCarEnv) -> Vec<DimensionInfo> {
    let mut dims: Vec<DimensionInfo> = env
        .observation_space()
        .continuous_bounds()
        .into_iter()
        .map(|(lo, hi)| DimensionInfo::new(lo, hi, 8, 1.0).unwrap())
        .collect();
    dims.push(DimensionInfo::new(0.0, (N_ACTIONS - 1) as f64, N_ACTIONS - 1, 1.0).unwrap());
    dims
}

fn sarsa_agent(tile_code: Box<dyn TileCode>, seed: u64) -> GradientDescentAgent {
    GradientDescentAgent::new(
        Box::new(EpsilonGreedy::new(0.1, seed).unwrap()),
        tile_code,
        0.5,
        1.0,
        0.9,
        TraceResetStrategy::Keep,
        N_ACTIONS,
    )
    .unwrap()
}

fn train_rewards(coder_seed: u64, policy_seed: u64, env_seed: u64) -> Vec<f64> {
    let env = MountainCarEnv::new(200, env_seed);
    let coder = TileCodeCorrect::new(coder_dimensions(&env), 8, coder_seed).unwrap();
    let mut agent = sarsa_agent(Box::new(coder), policy_seed);
    let mut trainer = ContinuousTrainer::new(Box::new(env));
    let (training_reward, training_length, training_error, _, _) =
        trainer.train(&mut agent, 15, 0, 0).unwrap();

    assert_eq!(training_reward.len(), 15);
    assert_eq!(training_length.len(), 15);
    assert!(training_length.iter().all(|&l| l <= 201));
    assert!(training_error.iter().all(|td| td.is_finite()));
    training_reward
}

#[test]
fn gradient_descent_sarsa_runs_on_mountain_car() {
    let rewards = train_rewards(17, 3, 5);
    // Step cap 200, -1 per step: every episode return is in [-201, 0).
    assert!(rewards.iter().all(|&r| r >= -201.0 && r < 0.0));
}

#[test]
fn seeded_training_is_reproducible() {
    assert_eq!(train_rewards(17, 3, 5), train_rewards(17, 3, 5));
}

#[test]
fn hashed_coder_drives_the_same_loop() {
    let env = MountainCarEnv::new(200, 9);
    let coder = TileCodeHashed::unh(coder_dimensions(&env), 8, 4096, 21).unwrap();
    let mut agent = sarsa_agent(Box::new(coder), 7);
    let mut trainer = ContinuousTrainer::new(Box::new(env));
    let (training_reward, _, training_error, _, _) =
        trainer.train(&mut agent, 10, 0, 0).unwrap();
    assert_eq!(training_reward.len(), 10);
    assert!(training_error.iter().all(|td| td.is_finite()));
}

#[test]
fn watkins_variant_runs_on_mountain_car() {
    let env = MountainCarEnv::new(200, 13);
    let coder = TileCodeCorrect::new(coder_dimensions(&env), 8, 29).unwrap();
    let mut agent = GradientDescentAgent::new(
        Box::new(EpsilonGreedy::new(0.1, 1).unwrap()),
        Box::new(coder),
        0.5,
        1.0,
        0.9,
        TraceResetStrategy::ZeroOnExploratory,
        N_ACTIONS,
    )
    .unwrap();
    let mut trainer = ContinuousTrainer::new(Box::new(env));
    let (training_reward, _, training_error, _, _) =
        trainer.train(&mut agent, 10, 0, 0).unwrap();
    assert_eq!(training_reward.len(), 10);
    assert!(training_error.iter().all(|td| td.is_finite()));
}
