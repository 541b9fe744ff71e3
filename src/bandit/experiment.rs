//! Experiment drivers for the bandit exercises

use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;

use super::{
    agent::{BanditLearner, EpsilonGreedyAgent, StepSize, TieBreak},
    environment::{BinaryBandit, NonStationaryBandit},
};
use crate::{Error, Result, utils::moving_average};

/// Success probabilities of arms A and B in the binary experiment
pub const BINARY_ARMS: [f64; 2] = [0.7, 0.3];

fn seeded(seed: Option<u64>, offset: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(offset)),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Per-step record of the binary bandit experiment
#[derive(Debug, Clone, Serialize)]
pub struct BinaryExperimentResult {
    pub epsilon: f64,
    pub rewards: Vec<f64>,
    pub optimal_actions: Vec<bool>,
}

impl BinaryExperimentResult {
    pub fn average_reward(&self) -> f64 {
        if self.rewards.is_empty() {
            0.0
        } else {
            self.rewards.iter().sum::<f64>() / self.rewards.len() as f64
        }
    }

    pub fn optimal_fraction(&self) -> f64 {
        crate::utils::rate(
            self.optimal_actions.iter().filter(|&&hit| hit).count(),
            self.optimal_actions.len(),
        )
    }

    /// Moving average of the reward series over `window` steps
    pub fn smoothed_rewards(&self, window: usize) -> Vec<f64> {
        moving_average(&self.rewards, window)
    }

    /// Moving average of the optimal-action indicator over `window` steps
    pub fn smoothed_optimal(&self, window: usize) -> Vec<f64> {
        let indicator: Vec<f64> = self
            .optimal_actions
            .iter()
            .map(|&hit| if hit { 1.0 } else { 0.0 })
            .collect();
        moving_average(&indicator, window)
    }
}

/// Two-armed Bernoulli bandit (p = 0.7 / 0.3) against a sample-average
/// ε-greedy agent with random tie-breaking.
///
/// With a seed, the arms draw from `seed` and the agent from `seed + 1`.
pub fn run_binary_experiment(
    steps: usize,
    epsilon: f64,
    seed: Option<u64>,
) -> Result<BinaryExperimentResult> {
    let arms = [
        BinaryBandit::new(BINARY_ARMS[0])?,
        BinaryBandit::new(BINARY_ARMS[1])?,
    ];
    let optimal_action = 0;

    let mut env_rng = seeded(seed, 0);
    let mut agent = EpsilonGreedyAgent::new(arms.len(), epsilon, StepSize::SampleAverage)?
        .with_tie_break(TieBreak::Random);
    if let Some(seed) = seed {
        agent = agent.with_seed(seed.wrapping_add(1));
    }

    let mut rewards = Vec::with_capacity(steps);
    let mut optimal_actions = Vec::with_capacity(steps);

    for _ in 0..steps {
        let action = agent.select_action();
        let reward = arms[action].pull(&mut env_rng);
        agent.update(action, reward)?;

        rewards.push(reward);
        optimal_actions.push(action == optimal_action);
    }

    Ok(BinaryExperimentResult {
        epsilon,
        rewards,
        optimal_actions,
    })
}

/// Parameters of the non-stationary comparison
#[derive(Debug, Clone, Serialize)]
pub struct NonStationaryConfig {
    pub steps: usize,
    pub runs: usize,
    pub arms: usize,
    pub epsilon: f64,
    pub alpha: f64,
    pub seed: Option<u64>,
}

impl Default for NonStationaryConfig {
    fn default() -> Self {
        Self {
            steps: 10_000,
            runs: 20,
            arms: 10,
            epsilon: 0.1,
            alpha: 0.1,
            seed: None,
        }
    }
}

/// Run-averaged reward and optimal-action fraction, one entry per step
#[derive(Debug, Clone, Serialize)]
pub struct LearningCurves {
    pub average_reward: Vec<f64>,
    pub optimal_fraction: Vec<f64>,
}

impl LearningCurves {
    fn zeros(steps: usize) -> Self {
        Self {
            average_reward: vec![0.0; steps],
            optimal_fraction: vec![0.0; steps],
        }
    }

    fn scale(&mut self, factor: f64) {
        for value in self
            .average_reward
            .iter_mut()
            .chain(self.optimal_fraction.iter_mut())
        {
            *value *= factor;
        }
    }

    /// Mean optimal-action fraction over the last `tail` steps
    pub fn final_optimal_fraction(&self, tail: usize) -> f64 {
        let tail = tail.min(self.optimal_fraction.len());
        if tail == 0 {
            return 0.0;
        }
        let start = self.optimal_fraction.len() - tail;
        self.optimal_fraction[start..].iter().sum::<f64>() / tail as f64
    }
}

/// Sample-average versus constant-step agents on the same drifting bandit
#[derive(Debug, Clone, Serialize)]
pub struct NonStationaryComparison {
    pub sample_average: LearningCurves,
    pub constant_step: LearningCurves,
}

/// Both agents pull the same bandit every step, then its means drift.
/// Greedy choices use plain argmax.
pub fn run_nonstationary_comparison(
    config: &NonStationaryConfig,
) -> Result<NonStationaryComparison> {
    if config.runs == 0 {
        return Err(Error::config("number of runs must be positive"));
    }

    let steps = config.steps;
    let mut sample_average = LearningCurves::zeros(steps);
    let mut constant_step = LearningCurves::zeros(steps);

    log::info!(
        "running comparison for {steps} steps over {} runs",
        config.runs
    );

    for run in 0..config.runs {
        let base = (run as u64) * 3;
        let mut env_rng = seeded(config.seed, base);
        let mut bandit = NonStationaryBandit::new(config.arms)?;

        let mut standard =
            EpsilonGreedyAgent::new(config.arms, config.epsilon, StepSize::SampleAverage)?
                .with_tie_break(TieBreak::First);
        let mut modified =
            EpsilonGreedyAgent::new(config.arms, config.epsilon, StepSize::Constant(config.alpha))?
                .with_tie_break(TieBreak::First);
        if let Some(seed) = config.seed {
            standard = standard.with_seed(seed.wrapping_add(base + 1));
            modified = modified.with_seed(seed.wrapping_add(base + 2));
        }

        for step in 0..steps {
            let optimal = bandit.optimal_action();

            let action = standard.select_action();
            let reward = bandit.pull(action, &mut env_rng)?;
            standard.update(action, reward)?;
            sample_average.average_reward[step] += reward;
            if action == optimal {
                sample_average.optimal_fraction[step] += 1.0;
            }

            let action = modified.select_action();
            let reward = bandit.pull(action, &mut env_rng)?;
            modified.update(action, reward)?;
            constant_step.average_reward[step] += reward;
            if action == optimal {
                constant_step.optimal_fraction[step] += 1.0;
            }

            bandit.step(&mut env_rng);
        }

        log::debug!("finished run {}/{}", run + 1, config.runs);
    }

    let factor = 1.0 / config.runs as f64;
    sample_average.scale(factor);
    constant_step.scale(factor);

    Ok(NonStationaryComparison {
        sample_average,
        constant_step,
    })
}

/// Arm means of a fresh drifting bandit at each step, recorded before the step.
pub fn random_walk_trace(arms: usize, steps: usize, seed: Option<u64>) -> Result<Vec<Vec<f64>>> {
    let mut bandit = NonStationaryBandit::new(arms)?;
    let mut rng = seeded(seed, 0);
    let mut history = Vec::with_capacity(steps);
    for _ in 0..steps {
        history.push(bandit.means().to_vec());
        bandit.step(&mut rng);
    }
    Ok(history)
}
