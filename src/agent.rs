mod one_step_qlearning;

pub use one_step_qlearning::QLearningAgent;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("state {state} is outside the table's {state_size} states")]
    StateOutOfRange { state: usize, state_size: usize },
    #[error("action {action} is outside the table's {action_size} actions")]
    ActionOutOfRange { action: usize, action_size: usize },
}

/// An agent over discrete observations and discrete actions.
pub trait DiscreteAgent {
    fn choose_action(&mut self, obs: usize) -> Result<usize, AgentError>;

    /// Learns from one transition and returns its temporal difference.
    fn update(
        &mut self,
        curr_obs: usize,
        curr_action: usize,
        reward: f64,
        next_obs: usize,
    ) -> Result<f64, AgentError>;

    fn reset(&mut self);
}
