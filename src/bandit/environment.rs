//! Reward sources for the bandit exercises

use rand::Rng;
use rand_distr::StandardNormal;

use crate::{Error, Result, utils::argmax};

/// Standard deviation of the per-step random walk of every arm's mean
pub const DRIFT_STD: f64 = 0.01;

/// Standard deviation of a single reward around the arm's mean
pub const REWARD_STD: f64 = 1.0;

/// Single arm paying 1 with probability `p`, otherwise 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryBandit {
    p: f64,
}

impl BinaryBandit {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] unless `p` lies in [0, 1].
    pub fn new(p: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::config(format!(
                "success probability {p} must lie in [0, 1]"
            )));
        }
        Ok(Self { p })
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn pull(&self, rng: &mut impl Rng) -> f64 {
        if rng.random::<f64>() < self.p { 1.0 } else { 0.0 }
    }
}

/// k-armed bandit whose arm means drift by a Gaussian random walk.
#[derive(Debug, Clone, PartialEq)]
pub struct NonStationaryBandit {
    means: Vec<f64>,
    time_step: usize,
}

impl NonStationaryBandit {
    /// All arm means start at zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for zero arms.
    pub fn new(arms: usize) -> Result<Self> {
        if arms == 0 {
            return Err(Error::config("a bandit needs at least one arm"));
        }
        Ok(Self {
            means: vec![0.0; arms],
            time_step: 0,
        })
    }

    pub fn arms(&self) -> usize {
        self.means.len()
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn time_step(&self) -> usize {
        self.time_step
    }

    /// Move every arm's mean by independent N(0, 0.01²) noise.
    pub fn step(&mut self, rng: &mut impl Rng) {
        for mean in &mut self.means {
            let noise: f64 = rng.sample(StandardNormal);
            *mean += DRIFT_STD * noise;
        }
        self.time_step += 1;
    }

    /// Reward drawn from N(mean of `action`, 1).
    pub fn pull(&self, action: usize, rng: &mut impl Rng) -> Result<f64> {
        let mean = self.means.get(action).ok_or(Error::InvalidAction {
            action,
            arms: self.means.len(),
        })?;
        let noise: f64 = rng.sample(StandardNormal);
        Ok(mean + REWARD_STD * noise)
    }

    /// Arm with the highest current mean (lowest index on ties)
    pub fn optimal_action(&self) -> usize {
        argmax(&self.means).unwrap_or(0)
    }
}
