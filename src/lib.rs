pub mod action_selection;
pub mod agent;
pub mod config;
pub mod env;
pub mod plot;
pub mod trainer;
pub mod utils;

pub use agent::{DiscreteAgent, QLearningAgent};
pub use config::{AgentConfig, Config, TrainingConfig};
pub use env::{DiscreteEnv, InventoryEnv};
