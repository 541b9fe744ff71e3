//! Bandit command - Run the epsilon-greedy bandit exercises

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::{
    bandit::{
        NonStationaryConfig, random_walk_trace, run_binary_experiment,
        run_nonstationary_comparison,
    },
    cli::output::{format_percent, print_kv, print_section, print_series, print_subsection},
};

#[derive(Parser, Debug)]
#[command(about = "Run a multi-armed bandit experiment")]
pub struct BanditArgs {
    #[command(subcommand)]
    pub experiment: BanditExperiment,
}

#[derive(Subcommand, Debug)]
pub enum BanditExperiment {
    /// Two-armed Bernoulli bandit (p = 0.7 / 0.3)
    Binary {
        /// Number of pulls
        #[arg(long, default_value_t = 2000)]
        steps: usize,

        /// Exploration rates to compare, comma separated
        #[arg(long, value_delimiter = ',', default_values_t = vec![0.1])]
        epsilon: Vec<f64>,

        /// Moving-average window for the printed curves
        #[arg(long, default_value_t = 50)]
        window: usize,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sample-average versus constant step size on a drifting 10-armed bandit
    Nonstationary {
        /// Steps per run
        #[arg(long, default_value_t = 10_000)]
        steps: usize,

        /// Independent runs to average
        #[arg(long, default_value_t = 20)]
        runs: usize,

        /// Exploration rate
        #[arg(long, default_value_t = 0.1)]
        epsilon: f64,

        /// Constant step size
        #[arg(long, default_value_t = 0.1)]
        alpha: f64,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Arm means of a drifting bandit over time
    Walk {
        #[arg(long, default_value_t = 10)]
        arms: usize,

        #[arg(long, default_value_t = 1000)]
        steps: usize,

        /// Print every n-th step
        #[arg(long, default_value_t = 100)]
        every: usize,

        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Execute the bandit command
pub fn execute(args: BanditArgs) -> Result<()> {
    match args.experiment {
        BanditExperiment::Binary {
            steps,
            epsilon,
            window,
            seed,
            json,
        } => {
            let results = epsilon
                .iter()
                .map(|&eps| run_binary_experiment(steps, eps, seed))
                .collect::<crate::Result<Vec<_>>>()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
                return Ok(());
            }

            print_section("Binary bandit (p = 0.7 / 0.3)");
            for result in &results {
                print_subsection(&format!("epsilon = {}", result.epsilon));
                print_kv("Average reward", &format!("{:.3}", result.average_reward()));
                print_kv("Optimal action", &format_percent(result.optimal_fraction()));
                let smoothed = result.smoothed_optimal(window);
                let sampled: Vec<f64> = smoothed.iter().step_by(window.max(1)).copied().collect();
                println!("  Optimal fraction, moving average over {window} steps:");
                print_series(&sampled, 10);
            }
        }
        BanditExperiment::Nonstationary {
            steps,
            runs,
            epsilon,
            alpha,
            seed,
            json,
        } => {
            let config = NonStationaryConfig {
                steps,
                runs,
                epsilon,
                alpha,
                seed,
                ..NonStationaryConfig::default()
            };
            let comparison = run_nonstationary_comparison(&config)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
                return Ok(());
            }

            print_section("Non-stationary 10-armed bandit");
            let tail = (steps / 10).max(1);
            for (label, curves) in [
                ("Sample average", &comparison.sample_average),
                ("Constant step", &comparison.constant_step),
            ] {
                print_subsection(label);
                print_kv(
                    "Final optimal",
                    &format_percent(curves.final_optimal_fraction(tail)),
                );
                let final_reward = curves.average_reward.iter().rev().take(tail).sum::<f64>()
                    / tail.min(curves.average_reward.len()).max(1) as f64;
                print_kv("Final reward", &format!("{final_reward:.3}"));
            }
        }
        BanditExperiment::Walk {
            arms,
            steps,
            every,
            seed,
        } => {
            let trace = random_walk_trace(arms, steps, seed)?;
            print_section(&format!("Random walk of {arms} arm means"));
            for (step, means) in trace.iter().enumerate().step_by(every.max(1)) {
                let row: Vec<String> = means.iter().map(|m| format!("{m:+.3}")).collect();
                println!("  {step:>6}: {}", row.join(" "));
            }
        }
    }
    Ok(())
}
