use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use log::{info, warn};

use inventory_rl::config::{AgentConfig, Config, TrainingConfig};
use inventory_rl::env::{DiscreteEnv, InventoryEnv};
use inventory_rl::plot::{plot_policy, plot_rewards};
use inventory_rl::trainer::{example, train};
use inventory_rl::utils::moving_average;
use inventory_rl::QLearningAgent;

extern crate structopt;

use structopt::StructOpt;

/// Train a tabular Q-Learning agent to restock a single-item inventory and plot the results
#[derive(StructOpt, Debug)]
#[structopt(name = "RLRust - Inventory")]
struct Cli {
    /// TOML file with [agent] and [training] sections; flags below override it
    #[structopt(long = "config", parse(from_os_str))]
    config: Option<PathBuf>,

    /// Show example of episode after training
    #[structopt(long = "show_example")]
    show_example: bool,

    /// Number of episodes for the training
    #[structopt(long = "n_episodes", short = "n")]
    n_episodes: Option<usize>,

    /// Number of steps per episode
    #[structopt(long = "max_steps")]
    max_steps: Option<usize>,

    /// Learning rate of the RL agent
    #[structopt(long = "learning_rate")]
    learning_rate: Option<f64>,

    /// Discount factor to be used on the temporal difference calculation
    #[structopt(long = "discount_factor")]
    discount_factor: Option<f64>,

    /// Exploration ratio of the epsilon-greedy action selection
    #[structopt(long = "epsilon")]
    epsilon: Option<f64>,

    /// Seed for reproducibility
    #[structopt(long = "seed")]
    seed: Option<u64>,

    /// Moving average window to be used on the visualization of results
    #[structopt(long = "moving_average_window")]
    moving_average_window: Option<usize>,

    /// Directory where the charts are written
    #[structopt(long = "output_dir", default_value = "assets", parse(from_os_str))]
    output_dir: PathBuf,
}

fn override_value<T: std::fmt::Debug + PartialEq>(name: &str, target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        if *target != value {
            warn!("{} overridden from the command line: {:?} -> {:?}", name, target, value);
        }
        *target = value;
    }
}

fn load_config(cli: &Cli, env: &InventoryEnv) -> Result<Config, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            Config::from_file(path)?
        }
        None => Config {
            agent: AgentConfig::new(env.observation_space().n, env.action_space().n),
            training: TrainingConfig::default(),
        },
    };

    let agent = &mut config.agent;
    override_value("learning_rate", &mut agent.learning_rate, cli.learning_rate);
    override_value("discount_factor", &mut agent.discount_factor, cli.discount_factor);
    override_value("epsilon", &mut agent.epsilon, cli.epsilon);

    let training = &mut config.training;
    override_value("n_episodes", &mut training.n_episodes, cli.n_episodes);
    override_value("max_steps", &mut training.max_steps, cli.max_steps);
    override_value("seed", &mut training.seed, cli.seed);
    override_value(
        "moving_average_window",
        &mut training.moving_average_window,
        cli.moving_average_window,
    );

    config.agent.validate()?;
    config
        .agent
        .check_spaces(&env.observation_space(), &env.action_space())?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli: Cli = Cli::from_args();

    let mut env = InventoryEnv::new();
    let config = load_config(&cli, &env)?;
    info!("{:?}", config);

    let mut agent = QLearningAgent::with_seed(&config.agent, config.training.seed)?;

    let now: Instant = Instant::now();
    let results = train(
        &mut env,
        &mut agent,
        config.training.n_episodes,
        config.training.max_steps,
    )?;
    info!("Time elapsed: {:.2?}", now.elapsed());

    let ma_reward = moving_average(
        config.training.moving_average_window,
        &results.episode_rewards,
    );
    if let Some(last) = ma_reward.last() {
        info!(
            "mean reward over the last {} episodes: {:.2}",
            config.training.moving_average_window, last
        );
    }

    let policy = agent.greedy_policy();
    for (stock, action) in policy.iter().enumerate() {
        info!("stock {:>2} -> order {}", stock, action);
    }

    if cli.show_example {
        example(&mut env, &mut agent, config.training.max_steps)?;
    }

    std::fs::create_dir_all(&cli.output_dir)?;
    let rewards_path = cli.output_dir.join("training_rewards.png");
    plot_rewards(&rewards_path, &results.episode_rewards)?;
    info!("wrote {}", rewards_path.display());

    let policy_path = cli.output_dir.join("learned_policy.png");
    plot_policy(&policy_path, &policy, agent.action_size())?;
    info!("wrote {}", policy_path.display());

    Ok(())
}
