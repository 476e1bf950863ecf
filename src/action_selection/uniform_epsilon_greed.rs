use ndarray::ArrayView1;
use rand::rngs::StdRng;
use rand::{distributions::Uniform, prelude::Distribution};

use crate::env::DiscreteSpace;
use crate::utils::argmax;

/// Epsilon-greedy selection: with probability `epsilon` a uniformly random
/// action, otherwise the first action of maximal value.
#[derive(Debug, Clone)]
pub struct UniformEpsilonGreed {
    exploration_decider: Uniform<f64>,
    rand_action_selecter: DiscreteSpace,
    epsilon: f64,
    rng: StdRng,
}

impl UniformEpsilonGreed {
    pub fn new(epsilon: f64, action_space: DiscreteSpace, rng: StdRng) -> Self {
        Self {
            exploration_decider: Uniform::from(0.0..1.0),
            rand_action_selecter: action_space,
            epsilon,
            rng,
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    fn should_explore(&mut self) -> bool {
        self.exploration_decider.sample(&mut self.rng) < self.epsilon
    }

    pub fn get_action(&mut self, values: ArrayView1<f64>) -> usize {
        if self.should_explore() {
            self.rand_action_selecter.sample(&mut self.rng)
        } else {
            argmax(values.iter())
        }
    }
}
