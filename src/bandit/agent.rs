//! Epsilon-greedy action-value agents

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{Error, Result, utils::argmax_all};

fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// How far an estimate moves toward each new reward
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepSize {
    /// 1 / N(a): the estimate is the plain average of every reward seen
    SampleAverage,
    /// Fixed alpha: recent rewards weigh more, which tracks drifting arms
    Constant(f64),
}

/// Which greedy action wins when several share the top estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    #[default]
    Random,
    /// Lowest index, the same as a plain argmax
    First,
}

/// Bandit learner capability: pick an arm, then learn from its reward.
pub trait BanditLearner {
    fn select_action(&mut self) -> usize;

    /// # Errors
    ///
    /// Returns [`Error::InvalidAction`] for an arm outside the action set.
    fn update(&mut self, action: usize, reward: f64) -> Result<()>;

    /// Current value estimate of every arm
    fn estimates(&self) -> &[f64];

    fn name(&self) -> &str;
}

/// ε-greedy agent over a fixed set of arms
#[derive(Debug, Clone)]
pub struct EpsilonGreedyAgent {
    name: String,
    q_values: Vec<f64>,
    action_counts: Vec<u64>,
    epsilon: f64,
    step_size: StepSize,
    tie_break: TieBreak,
    rng: StdRng,
}

impl EpsilonGreedyAgent {
    /// Create an agent with all estimates at zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for zero arms, an epsilon
    /// outside [0, 1], or a constant step size outside (0, 1].
    pub fn new(arms: usize, epsilon: f64, step_size: StepSize) -> Result<Self> {
        if arms == 0 {
            return Err(Error::config("an agent needs at least one arm"));
        }
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(Error::config(format!("epsilon {epsilon} must lie in [0, 1]")));
        }
        if let StepSize::Constant(alpha) = step_size
            && !(alpha > 0.0 && alpha <= 1.0)
        {
            return Err(Error::config(format!(
                "step size {alpha} must lie in (0, 1]"
            )));
        }

        let name = match step_size {
            StepSize::SampleAverage => "Sample average".to_string(),
            StepSize::Constant(alpha) => format!("Constant step (alpha={alpha})"),
        };

        Ok(Self {
            name,
            q_values: vec![0.0; arms],
            action_counts: vec![0; arms],
            epsilon,
            step_size,
            tie_break: TieBreak::default(),
            rng: build_rng(None),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = build_rng(Some(seed));
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn arms(&self) -> usize {
        self.q_values.len()
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn step_size(&self) -> StepSize {
        self.step_size
    }

    /// Number of updates each arm has received
    pub fn action_counts(&self) -> &[u64] {
        &self.action_counts
    }

    fn greedy_action(&mut self) -> usize {
        let best = argmax_all(&self.q_values);
        match self.tie_break {
            TieBreak::First => best.first().copied().unwrap_or(0),
            TieBreak::Random => best.choose(&mut self.rng).copied().unwrap_or(0),
        }
    }
}

impl BanditLearner for EpsilonGreedyAgent {
    fn select_action(&mut self) -> usize {
        if self.rng.random::<f64>() < self.epsilon {
            self.rng.random_range(0..self.q_values.len())
        } else {
            self.greedy_action()
        }
    }

    fn update(&mut self, action: usize, reward: f64) -> Result<()> {
        let arms = self.q_values.len();
        if action >= arms {
            return Err(Error::InvalidAction { action, arms });
        }

        self.action_counts[action] += 1;
        let alpha = match self.step_size {
            StepSize::SampleAverage => 1.0 / self.action_counts[action] as f64,
            StepSize::Constant(alpha) => alpha,
        };
        let q = &mut self.q_values[action];
        *q += alpha * (reward - *q);
        Ok(())
    }

    fn estimates(&self) -> &[f64] {
        &self.q_values
    }

    fn name(&self) -> &str {
        &self.name
    }
}
