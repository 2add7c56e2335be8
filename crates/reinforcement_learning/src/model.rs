mod state_action_transition;

pub use state_action_transition::StateActionTransition;
