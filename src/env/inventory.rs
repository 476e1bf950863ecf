use log::trace;

use crate::env::{DiscreteEnv, DiscreteSpace, EnvError, StepInfo, Transition};

/// Single-item inventory. Each step the agent orders 0 to 3 units, a fixed
/// demand of 3 units is served and the stock is clamped to `0..=10`.
///
/// Reward is -10 when the stock runs out, -5 when it hits capacity and 0
/// otherwise. Episodes never terminate on their own.
#[derive(Debug, Clone)]
pub struct InventoryEnv {
    stock: usize,
}

impl InventoryEnv {
    pub const INITIAL_STOCK: usize = 5;
    pub const MIN_STOCK: usize = 0;
    pub const MAX_STOCK: usize = 10;
    pub const DEMAND: usize = 3;
    pub const N_ACTIONS: usize = 4;
    pub const STOCKOUT_PENALTY: f64 = -10.0;
    pub const OVERSTOCK_PENALTY: f64 = -5.0;

    pub fn new() -> Self {
        Self {
            stock: Self::INITIAL_STOCK,
        }
    }

    pub fn with_stock(stock: usize) -> Result<Self, EnvError> {
        if stock > Self::MAX_STOCK {
            return Err(EnvError::InvalidStock {
                stock,
                max_stock: Self::MAX_STOCK,
            });
        }
        Ok(Self { stock })
    }

    pub fn stock(&self) -> usize {
        self.stock
    }

    fn next_stock(&self, action: usize) -> usize {
        let stock = (self.stock + action).saturating_sub(Self::DEMAND);
        stock.clamp(Self::MIN_STOCK, Self::MAX_STOCK)
    }

    fn reward(stock: usize) -> f64 {
        if stock == Self::MIN_STOCK {
            Self::STOCKOUT_PENALTY
        } else if stock == Self::MAX_STOCK {
            Self::OVERSTOCK_PENALTY
        } else {
            0.0
        }
    }
}

impl Default for InventoryEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscreteEnv for InventoryEnv {
    fn reset(&mut self) -> usize {
        self.stock = Self::INITIAL_STOCK;
        self.stock
    }

    fn step(&mut self, action: usize) -> Result<Transition, EnvError> {
        let action_space = self.action_space();
        if !action_space.contains(action) {
            return Err(EnvError::InvalidAction {
                action,
                n_actions: action_space.n,
            });
        }
        let stock = self.next_stock(action);
        let reward = Self::reward(stock);
        trace!(
            "order {} units: stock {} -> {}, reward {}",
            action,
            self.stock,
            stock,
            reward
        );
        self.stock = stock;
        Ok((stock, reward, false, StepInfo::default()))
    }

    fn render(&self) -> String {
        format!("Current stock: {}", self.stock)
    }

    fn action_space(&self) -> DiscreteSpace {
        DiscreteSpace::new(Self::N_ACTIONS)
    }

    fn observation_space(&self) -> DiscreteSpace {
        DiscreteSpace::new(Self::MAX_STOCK + 1)
    }
}
