mod epsilon_greedy;
mod softmax;

use ndarray::Array1;

pub use epsilon_greedy::EpsilonGreedy;
pub use softmax::Softmax;

// Policies see a snapshot of the Q-values for one state, never the learner
// itself.
pub trait ActionSelection {
    fn get_action(&mut self, values: &Array1<f64>) -> usize;
    fn get_exploration_probs(&self, values: &Array1<f64>) -> Array1<f64>;
    fn reset(&mut self);
}
