mod inventory;
mod space;

use thiserror::Error;

pub use inventory::InventoryEnv;
pub use space::DiscreteSpace;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("action {action} is outside the action space of size {n_actions}")]
    InvalidAction { action: usize, n_actions: usize },
    #[error("stock {stock} is outside the range 0..={max_stock}")]
    InvalidStock { stock: usize, max_stock: usize },
}

/// Diagnostic metadata attached to every step. Currently carries nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepInfo {}

/// (next observation, reward, done, info)
pub type Transition = (usize, f64, bool, StepInfo);

pub trait DiscreteEnv {
    fn reset(&mut self) -> usize;
    fn step(&mut self, action: usize) -> Result<Transition, EnvError>;
    fn render(&self) -> String;
    fn action_space(&self) -> DiscreteSpace;
    fn observation_space(&self) -> DiscreteSpace;
}
