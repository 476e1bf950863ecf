mod uniform_epsilon_greed;

pub use uniform_epsilon_greed::UniformEpsilonGreed;
