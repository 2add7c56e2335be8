use environments::toy_text::RandomWalkEnv;
use environments::Env;
use reinforcement_learning::action_selection::{EpsilonGreedy, Softmax};
use reinforcement_learning::agent::{
    qlearning, sarsa, DiscreteAgent, DynaAgent, EligibilityTracesAgent,
};
use reinforcement_learning::trainer::DiscreteTrainer;

const TOWARD_TERMINAL: usize = 0;

#[test]
fn sarsa_lambda_learns_the_two_state_corridor() {
    // γ = 1, α = 0.5, λ = 0.9, ε = 0: the terminal reward must reach the
    // start state within three episodes.
    let env = RandomWalkEnv::new(2, 1, 100);
    let n_actions = env.action_space().get_discrete_combinations();
    let mut agent = EligibilityTracesAgent::new(
        Box::new(EpsilonGreedy::new(0.0, 0).unwrap()),
        sarsa,
        0.5,
        1.0,
        0.9,
        n_actions,
    )
    .unwrap();
    let mut trainer = DiscreteTrainer::new(Box::new(env));

    let (training_reward, training_length, _, _, _) = trainer.train(&mut agent, 3, 0, 0).unwrap();

    assert_eq!(training_reward.len(), 3);
    assert!(training_reward.iter().all(|&r| r == 1.0));
    assert!(training_length.iter().all(|&l| l == 2));
    for state in [0usize, 1] {
        assert_eq!(agent.get_best_action(&state), TOWARD_TERMINAL);
        let values = agent.q_values(&state);
        assert!(values[0] > values[1]);
    }
}

#[test]
fn dyna_accelerates_corridor_learning() {
    // 50 planning iterations per real step: two episodes are enough even on
    // a longer corridor.
    let inner = EligibilityTracesAgent::new(
        Box::new(EpsilonGreedy::new(0.0, 0).unwrap()),
        qlearning,
        0.5,
        0.9,
        0.9,
        2,
    )
    .unwrap();
    let mut agent = DynaAgent::new(Box::new(inner), 50, 1.0, 0.5, 0).unwrap();
    let mut trainer = DiscreteTrainer::new(Box::new(RandomWalkEnv::new(5, 4, 100)));

    trainer.train(&mut agent, 2, 0, 0).unwrap();

    assert_eq!(agent.model_len(), 5);
    for state in 0usize..5 {
        assert_eq!(agent.get_best_action(&state), TOWARD_TERMINAL);
    }
}

#[test]
fn softmax_exploration_also_finds_the_exit() {
    let mut agent = EligibilityTracesAgent::new(
        Box::new(Softmax::new(0.3, 5).unwrap()),
        sarsa,
        0.5,
        0.9,
        0.9,
        2,
    )
    .unwrap();
    let mut trainer = DiscreteTrainer::new(Box::new(RandomWalkEnv::new(2, 1, 100)));
    trainer.train(&mut agent, 25, 0, 0).unwrap();

    for state in [0usize, 1] {
        assert_eq!(agent.get_best_action(&state), TOWARD_TERMINAL);
    }
}

#[test]
fn evaluation_follows_the_greedy_policy() {
    let mut agent = EligibilityTracesAgent::new(
        Box::new(EpsilonGreedy::new(0.0, 0).unwrap()),
        sarsa,
        0.5,
        1.0,
        0.9,
        2,
    )
    .unwrap();
    let mut trainer = DiscreteTrainer::new(Box::new(RandomWalkEnv::new(3, 2, 100)));
    trainer.train(&mut agent, 3, 0, 0).unwrap();

    let (rewards, lengths) = trainer.evaluate(&mut agent, 5).unwrap();
    assert_eq!(rewards, vec![1.0; 5]);
    assert_eq!(lengths, vec![3; 5]);
}
