use kdam::{tqdm, BarExt};
use log::{debug, info};
use thiserror::Error;

use crate::agent::{AgentError, DiscreteAgent};
use crate::env::{DiscreteEnv, EnvError};

#[derive(Debug, Error)]
pub enum TrainError {
    #[error(transparent)]
    Env(#[from] EnvError),
    #[error(transparent)]
    Agent(#[from] AgentError),
}

#[derive(Debug, Clone, Default)]
pub struct TrainResults {
    /// Sum of rewards of each episode, in episode order.
    pub episode_rewards: Vec<f64>,
    /// Temporal difference of every update.
    pub training_error: Vec<f64>,
}

/// Runs `n_episodes` episodes of exactly `max_steps` steps each, updating the
/// agent after every step.
pub fn train<E: DiscreteEnv, A: DiscreteAgent>(
    env: &mut E,
    agent: &mut A,
    n_episodes: usize,
    max_steps: usize,
) -> Result<TrainResults, TrainError> {
    let mut results = TrainResults {
        episode_rewards: Vec::with_capacity(n_episodes),
        training_error: Vec::with_capacity(n_episodes.saturating_mul(max_steps)),
    };

    let mut pb = tqdm!(total = n_episodes);
    pb.set_description("Training Episodes".to_string());
    pb.refresh();

    for episode in 0..n_episodes {
        let mut epi_reward: f64 = 0.0;
        let mut curr_obs: usize = env.reset();
        for _ in 0..max_steps {
            let curr_action: usize = agent.choose_action(curr_obs)?;
            let (next_obs, reward, _done, _info) = env.step(curr_action)?;
            let td = agent.update(curr_obs, curr_action, reward, next_obs)?;
            results.training_error.push(td);
            curr_obs = next_obs;
            epi_reward += reward;
        }
        debug!("episode {} reward {}", episode, epi_reward);
        results.episode_rewards.push(epi_reward);
        pb.update(1);
    }

    if let Some(last) = results.episode_rewards.last() {
        info!(
            "trained for {} episodes, last episode reward {}",
            n_episodes, last
        );
    }
    Ok(results)
}

/// Plays `n_episodes` episodes without learning and returns their rewards.
pub fn evaluate<E: DiscreteEnv, A: DiscreteAgent>(
    env: &mut E,
    agent: &mut A,
    n_episodes: usize,
    max_steps: usize,
) -> Result<Vec<f64>, TrainError> {
    let mut reward_history: Vec<f64> = Vec::with_capacity(n_episodes);
    for _ in 0..n_episodes {
        let mut epi_reward: f64 = 0.0;
        let mut curr_obs: usize = env.reset();
        for _ in 0..max_steps {
            let action: usize = agent.choose_action(curr_obs)?;
            let (next_obs, reward, _done, _info) = env.step(action)?;
            curr_obs = next_obs;
            epi_reward += reward;
        }
        reward_history.push(epi_reward);
    }
    Ok(reward_history)
}

/// Plays a single episode, logging the rendered environment at each step.
pub fn example<E: DiscreteEnv, A: DiscreteAgent>(
    env: &mut E,
    agent: &mut A,
    max_steps: usize,
) -> Result<f64, TrainError> {
    let mut epi_reward: f64 = 0.0;
    let mut curr_obs: usize = env.reset();
    for step in 0..max_steps {
        info!("{}", env.render());
        let action: usize = agent.choose_action(curr_obs)?;
        let (next_obs, reward, _done, _info) = env.step(action)?;
        info!("step {} ordered {} reward {}", step, action, reward);
        curr_obs = next_obs;
        epi_reward += reward;
    }
    info!("{}", env.render());
    info!("episode reward {}", epi_reward);
    Ok(epi_reward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgentConfig;
    use crate::env::InventoryEnv;
    use crate::QLearningAgent;

    fn setup(epsilon: f64) -> (InventoryEnv, QLearningAgent) {
        let env = InventoryEnv::new();
        let mut config = AgentConfig::new(env.observation_space().n, env.action_space().n);
        config.epsilon = epsilon;
        let agent = QLearningAgent::with_seed(&config, 42).unwrap();
        (env, agent)
    }

    #[test]
    fn records_one_reward_per_episode_and_one_error_per_step() {
        let (mut env, mut agent) = setup(0.1);
        let results = train(&mut env, &mut agent, 20, 50).unwrap();
        assert_eq!(results.episode_rewards.len(), 20);
        assert_eq!(results.training_error.len(), 20 * 50);
        assert!(results.episode_rewards.iter().all(|r| *r <= 0.0));
    }

    #[test]
    fn evaluate_does_not_learn() {
        let (mut env, mut agent) = setup(0.5);
        let rewards = evaluate(&mut env, &mut agent, 5, 50).unwrap();
        assert_eq!(rewards.len(), 5);
        assert!(agent.q_table().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn greedy_untrained_agent_runs_out_of_stock() {
        // all-zero table: argmax orders 0 every step, 5 -> 2 -> 0 -> 0 ...
        let (mut env, mut agent) = setup(0.0);
        let reward = example(&mut env, &mut agent, 4).unwrap();
        assert_eq!(reward, -30.0);
    }

    #[test]
    fn empty_runs_produce_empty_results() {
        let (mut env, mut agent) = setup(0.1);
        let results = train(&mut env, &mut agent, 0, 50).unwrap();
        assert!(results.episode_rewards.is_empty());
        assert!(results.training_error.is_empty());

        let results = train(&mut env, &mut agent, 3, 0).unwrap();
        assert_eq!(results.episode_rewards, vec![0.0, 0.0, 0.0]);
        assert!(results.training_error.is_empty());
    }

    #[test]
    fn huge_step_budget_does_not_overflow_the_reservation() {
        let (mut env, mut agent) = setup(0.1);
        let results = train(&mut env, &mut agent, 0, usize::MAX).unwrap();
        assert!(results.episode_rewards.is_empty());
    }
}
