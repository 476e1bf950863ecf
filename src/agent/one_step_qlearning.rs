use log::trace;
use ndarray::{Array2, ArrayView2};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::action_selection::UniformEpsilonGreed;
use crate::agent::{AgentError, DiscreteAgent};
use crate::config::{AgentConfig, ConfigError};
use crate::env::DiscreteSpace;
use crate::utils::{argmax, max};

/// One-step tabular Q-Learning over a dense `state_size x action_size` table.
///
/// The target always bootstraps from the best value of the next state, even
/// on the last step of an episode: the environments it is meant for never
/// report termination, so there is no terminal case to special-case.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: Array2<f64>,
    learning_rate: f64,
    discount_factor: f64,
    action_selection: UniformEpsilonGreed,
}

impl QLearningAgent {
    pub fn new(config: &AgentConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            q_table: Array2::zeros((config.state_size, config.action_size)),
            learning_rate: config.learning_rate,
            discount_factor: config.discount_factor,
            action_selection: UniformEpsilonGreed::new(
                config.epsilon,
                DiscreteSpace::new(config.action_size),
                rng,
            ),
        })
    }

    pub fn with_seed(config: &AgentConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    pub fn state_size(&self) -> usize {
        self.q_table.nrows()
    }

    pub fn action_size(&self) -> usize {
        self.q_table.ncols()
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    pub fn epsilon(&self) -> f64 {
        self.action_selection.epsilon()
    }

    pub fn q_table(&self) -> ArrayView2<'_, f64> {
        self.q_table.view()
    }

    pub fn q_value(&self, state: usize, action: usize) -> Result<f64, AgentError> {
        self.check_state(state)?;
        self.check_action(action)?;
        Ok(self.q_table[[state, action]])
    }

    /// Best known action for `state`, without exploration.
    pub fn greedy_action(&self, state: usize) -> Result<usize, AgentError> {
        self.check_state(state)?;
        Ok(argmax(self.q_table.row(state).iter()))
    }

    /// One greedy action per state, in state order.
    pub fn greedy_policy(&self) -> Vec<usize> {
        self.q_table
            .rows()
            .into_iter()
            .map(|row| argmax(row.iter()))
            .collect()
    }

    fn check_state(&self, state: usize) -> Result<(), AgentError> {
        if state >= self.state_size() {
            return Err(AgentError::StateOutOfRange {
                state,
                state_size: self.state_size(),
            });
        }
        Ok(())
    }

    fn check_action(&self, action: usize) -> Result<(), AgentError> {
        if action >= self.action_size() {
            return Err(AgentError::ActionOutOfRange {
                action,
                action_size: self.action_size(),
            });
        }
        Ok(())
    }
}

impl DiscreteAgent for QLearningAgent {
    fn choose_action(&mut self, obs: usize) -> Result<usize, AgentError> {
        self.check_state(obs)?;
        Ok(self.action_selection.get_action(self.q_table.row(obs)))
    }

    fn update(
        &mut self,
        curr_obs: usize,
        curr_action: usize,
        reward: f64,
        next_obs: usize,
    ) -> Result<f64, AgentError> {
        self.check_state(curr_obs)?;
        self.check_action(curr_action)?;
        self.check_state(next_obs)?;

        let future_q_value: f64 = max(self.q_table.row(next_obs).iter());
        let value: f64 = self.q_table[[curr_obs, curr_action]];
        let temporal_difference: f64 = reward + self.discount_factor * future_q_value - value;
        self.q_table[[curr_obs, curr_action]] = value + self.learning_rate * temporal_difference;

        trace!(
            "Q({}, {}): {} -> {} (td {})",
            curr_obs,
            curr_action,
            value,
            self.q_table[[curr_obs, curr_action]],
            temporal_difference
        );
        Ok(temporal_difference)
    }

    fn reset(&mut self) {
        self.q_table.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn agent(epsilon: f64, seed: u64) -> QLearningAgent {
        let mut config = AgentConfig::new(11, 4);
        config.epsilon = epsilon;
        QLearningAgent::with_seed(&config, seed).unwrap()
    }

    #[test]
    fn table_starts_at_zero_with_configured_shape() {
        let agent = agent(0.1, 0);
        assert_eq!(agent.q_table().dim(), (11, 4));
        assert!(agent.q_table().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn update_moves_towards_the_target() {
        let mut agent = agent(0.1, 0);
        let td = agent.update(3, 0, -10.0, 0).unwrap();
        assert_abs_diff_eq!(td, -10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(agent.q_value(3, 0).unwrap(), -1.0, epsilon = 1e-12);

        // next state row (0) is untouched, so the bootstrap stays at zero
        agent.update(3, 0, -10.0, 0).unwrap();
        assert_abs_diff_eq!(agent.q_value(3, 0).unwrap(), -1.9, epsilon = 1e-12);
    }

    #[test]
    fn update_bootstraps_from_best_next_value() {
        let mut agent = agent(0.1, 0);
        agent.q_table[[4, 2]] = 5.0;
        agent.q_table[[4, 1]] = -3.0;
        let td = agent.update(6, 1, 1.0, 4).unwrap();
        // 1 + 0.9 * 5 - 0
        assert_abs_diff_eq!(td, 5.5, epsilon = 1e-12);
        assert_abs_diff_eq!(agent.q_value(6, 1).unwrap(), 0.55, epsilon = 1e-12);
    }

    #[test]
    fn update_touches_a_single_entry() {
        let mut agent = agent(0.1, 0);
        agent.update(2, 3, -5.0, 2).unwrap();
        let changed = agent.q_table().iter().filter(|v| **v != 0.0).count();
        assert_eq!(changed, 1);
        assert_eq!(agent.q_table().dim(), (11, 4));
    }

    #[test]
    fn greedy_choice_takes_first_best_action() {
        let mut agent = agent(0.0, 0);
        assert_eq!(agent.choose_action(5).unwrap(), 0);
        agent.q_table[[5, 1]] = 2.0;
        agent.q_table[[5, 3]] = 2.0;
        for _ in 0..50 {
            assert_eq!(agent.choose_action(5).unwrap(), 1);
        }
        assert_eq!(agent.greedy_action(5).unwrap(), 1);
    }

    #[test]
    fn greedy_policy_has_one_action_per_state() {
        let mut agent = agent(0.1, 0);
        agent.q_table[[0, 3]] = 1.0;
        agent.q_table[[10, 0]] = 1.0;
        let policy = agent.greedy_policy();
        assert_eq!(policy.len(), 11);
        assert_eq!(policy[0], 3);
        assert_eq!(policy[10], 0);
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let mut agent = agent(0.1, 0);
        assert_eq!(
            agent.choose_action(11),
            Err(AgentError::StateOutOfRange {
                state: 11,
                state_size: 11
            })
        );
        assert_eq!(
            agent.update(0, 4, 0.0, 0),
            Err(AgentError::ActionOutOfRange {
                action: 4,
                action_size: 4
            })
        );
        assert!(agent.update(0, 0, 0.0, 11).is_err());
        assert!(agent.q_table().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = AgentConfig::new(11, 4);
        config.learning_rate = -0.5;
        assert!(QLearningAgent::with_seed(&config, 0).is_err());
    }

    #[test]
    fn reset_zeroes_the_table() {
        let mut agent = agent(0.1, 0);
        agent.update(1, 1, -10.0, 1).unwrap();
        agent.reset();
        assert!(agent.q_table().iter().all(|v| *v == 0.0));
    }
}
