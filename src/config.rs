use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::env::DiscreteSpace;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be greater than zero")]
    EmptyDimension { name: &'static str },
    #[error("{name} = {value} is outside {range}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        range: &'static str,
    },
    #[error("{name} is {configured} but the environment has {expected}")]
    SpaceMismatch {
        name: &'static str,
        configured: usize,
        expected: usize,
    },
    #[error("could not read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}

fn default_learning_rate() -> f64 {
    0.1
}

fn default_discount_factor() -> f64 {
    0.9
}

fn default_epsilon() -> f64 {
    0.1
}

/// Table dimensions and hyperparameters of a tabular Q-Learning agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub state_size: usize,
    pub action_size: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default = "default_discount_factor")]
    pub discount_factor: f64,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

impl AgentConfig {
    pub fn new(state_size: usize, action_size: usize) -> Self {
        Self {
            state_size,
            action_size,
            learning_rate: default_learning_rate(),
            discount_factor: default_discount_factor(),
            epsilon: default_epsilon(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.state_size == 0 {
            return Err(ConfigError::EmptyDimension { name: "state_size" });
        }
        if self.action_size == 0 {
            return Err(ConfigError::EmptyDimension {
                name: "action_size",
            });
        }
        // written so that NaN fails every check
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(ConfigError::OutOfRange {
                name: "learning_rate",
                value: self.learning_rate,
                range: "(0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(ConfigError::OutOfRange {
                name: "discount_factor",
                value: self.discount_factor,
                range: "[0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(ConfigError::OutOfRange {
                name: "epsilon",
                value: self.epsilon,
                range: "[0, 1]",
            });
        }
        Ok(())
    }

    pub fn check_spaces(
        &self,
        observation_space: &DiscreteSpace,
        action_space: &DiscreteSpace,
    ) -> Result<(), ConfigError> {
        if self.state_size != observation_space.n {
            return Err(ConfigError::SpaceMismatch {
                name: "state_size",
                configured: self.state_size,
                expected: observation_space.n,
            });
        }
        if self.action_size != action_space.n {
            return Err(ConfigError::SpaceMismatch {
                name: "action_size",
                configured: self.action_size,
                expected: action_space.n,
            });
        }
        Ok(())
    }
}

/// Parameters of the training driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub n_episodes: usize,
    pub max_steps: usize,
    pub seed: u64,
    pub moving_average_window: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_episodes: 5000,
            max_steps: 50,
            seed: 42,
            moving_average_window: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub agent: AgentConfig,
    #[serde(default)]
    pub training: TrainingConfig,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.agent.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
