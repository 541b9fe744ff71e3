//! Bandit environment and learner behaviour

use menace_sandbox::bandit::{
    BanditLearner, EpsilonGreedyAgent, NonStationaryBandit, NonStationaryConfig,
    StepSize, TieBreak, random_walk_trace, run_binary_experiment, run_nonstationary_comparison,
};
use rand::{SeedableRng, rngs::StdRng};

#[test]
fn binary_experiment_serializes_per_step_records() {
    let result = run_binary_experiment(20, 0.1, Some(4)).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["rewards"].as_array().unwrap().len(), 20);
    assert_eq!(json["optimal_actions"].as_array().unwrap().len(), 20);
    assert!(
        result
            .rewards
            .iter()
            .all(|&reward| reward == 0.0 || reward == 1.0)
    );
}

#[test]
fn optimal_arm_follows_the_drift() {
    let mut bandit = NonStationaryBandit::new(5).unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..500 {
        bandit.step(&mut rng);
        let best = bandit.optimal_action();
        assert!(bandit.means().iter().all(|&m| m <= bandit.means()[best]));
    }
}

#[test]
fn greedy_agent_without_exploration_can_lock_in() {
    let mut agent = EpsilonGreedyAgent::new(2, 0.0, StepSize::SampleAverage)
        .unwrap()
        .with_tie_break(TieBreak::First)
        .with_seed(3);
    // A small positive reward on arm 0 keeps it the only greedy choice.
    agent.update(0, 0.1).unwrap();
    for _ in 0..100 {
        let action = agent.select_action();
        assert_eq!(action, 0);
        agent.update(action, 0.1).unwrap();
    }
    assert_eq!(agent.action_counts()[1], 0);
}

#[test]
fn exploring_agent_beats_pure_greedy_on_average() {
    let runs = 20;
    let mean_optimal = |epsilon: f64| {
        (0..runs)
            .map(|seed| {
                run_binary_experiment(1000, epsilon, Some(seed))
                    .unwrap()
                    .optimal_fraction()
            })
            .sum::<f64>()
            / runs as f64
    };
    assert!(mean_optimal(0.1) > mean_optimal(0.0));
}

#[test]
fn constant_step_tracks_drift_better() {
    let config = NonStationaryConfig {
        steps: 5000,
        runs: 10,
        seed: Some(2024),
        ..NonStationaryConfig::default()
    };
    let comparison = run_nonstationary_comparison(&config).unwrap();
    let tail = 1000;
    assert!(
        comparison.constant_step.final_optimal_fraction(tail)
            > comparison.sample_average.final_optimal_fraction(tail)
    );
}

#[test]
fn random_walk_trace_is_reproducible() {
    let a = random_walk_trace(4, 100, Some(6)).unwrap();
    let b = random_walk_trace(4, 100, Some(6)).unwrap();
    assert_eq!(a, b);
    assert!(a.iter().all(|means| means.len() == 4));
}
