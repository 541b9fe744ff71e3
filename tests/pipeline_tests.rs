//! Tests for the training pipeline and its observers

use std::sync::{Arc, Mutex};

use menace_sandbox::{
    Error, Result,
    menace::{MenaceAgent, Outcome},
    pipeline::{
        MetricsObserver, Observer, RecordingObserver, TrainingConfig, TrainingPipeline,
        UniformRandomPolicy,
    },
    tictactoe::{GameState, Mark},
};

/// Logs the order of observer callbacks
struct EventLog(Arc<Mutex<Vec<String>>>);

impl Observer for EventLog {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        self.push(format!("start {total_games}"));
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, _outcome: Outcome) -> Result<()> {
        self.push(format!("game {game_num}"));
        Ok(())
    }

    fn on_block_end(&mut self, block_num: usize, _win_rate: f64) -> Result<()> {
        self.push(format!("block {block_num}"));
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.push("end".to_string());
        Ok(())
    }
}

impl EventLog {
    fn push(&self, event: String) {
        self.0.lock().unwrap().push(event);
    }
}

#[test]
fn agent_learns_to_beat_random_opponent() {
    let config = TrainingConfig::new(20_000).with_seed(42);
    let (agent, result) = TrainingPipeline::new(config).unwrap().run().unwrap();

    assert_eq!(result.win_rate_trend.len(), 200);
    let mean = |blocks: &[f64]| blocks.iter().sum::<f64>() / blocks.len() as f64;
    let early = mean(&result.win_rate_trend[..20]);
    let late = mean(&result.win_rate_trend[180..]);
    assert!(late > early, "early {early:.2} late {late:.2}");
    assert!(late >= 0.6, "late win rate {late:.2}");
    assert!(agent.states_seen() > 100);
}

#[test]
fn observers_see_blocks_after_their_last_game() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let config = TrainingConfig::new(4).with_block_size(2).with_seed(3);
    TrainingPipeline::new(config)
        .unwrap()
        .with_observer(Box::new(EventLog(Arc::clone(&events))))
        .run()
        .unwrap();

    let events = events.lock().unwrap();
    assert_eq!(
        *events,
        vec![
            "start 4", "game 1", "game 2", "block 1", "game 3", "game 4", "block 2", "end"
        ]
    );
}

#[test]
fn recording_matches_result_outcomes() {
    let recorder = RecordingObserver::new();
    let recorded = recorder.observations();
    let metrics = MetricsObserver::new();
    let summary = metrics.summary_handle();

    let config = TrainingConfig::new(50).with_block_size(10).with_seed(17);
    let (_, result) = TrainingPipeline::new(config)
        .unwrap()
        .with_observer(Box::new(recorder))
        .with_observer(Box::new(metrics))
        .run()
        .unwrap();

    let recorded = recorded.lock().unwrap();
    assert_eq!(recorded.len(), 50);
    for (observation, &outcome) in recorded.iter().zip(&result.outcomes) {
        assert_eq!(observation.outcome, outcome);
        assert!(observation.steps.len() >= 5);
        // Replaying the recorded moves rebuilds the final board.
        let mut state = GameState::new();
        for step in &observation.steps {
            assert!(state.apply_move(step.position, step.mark));
            assert_eq!(state.state_key(), step.state);
        }
    }

    let summary = summary.lock().unwrap();
    assert_eq!(summary.total_games, 50);
    assert_eq!(summary.wins, result.wins);
    assert_eq!(summary.block_win_rates, result.win_rate_trend);
}

#[test]
fn agent_can_train_as_o() {
    let config = TrainingConfig::new(200)
        .with_agent_mark(Mark::O)
        .with_seed(12);
    let recorder = RecordingObserver::new();
    let recorded = recorder.observations();
    let (_, result) = TrainingPipeline::new(config)
        .unwrap()
        .with_observer(Box::new(recorder))
        .run()
        .unwrap();

    assert_eq!(result.total_games, 200);
    let recorded = recorded.lock().unwrap();
    assert!(recorded.iter().all(|game| game.steps[0].mark == Mark::X));
}

#[test]
fn o_can_open_the_game() {
    let config = TrainingConfig::new(20)
        .with_first_mark(Mark::O)
        .with_seed(21);
    let recorder = RecordingObserver::new();
    let recorded = recorder.observations();
    TrainingPipeline::new(config)
        .unwrap()
        .with_observer(Box::new(recorder))
        .run()
        .unwrap();

    let recorded = recorded.lock().unwrap();
    assert!(recorded.iter().all(|game| game.steps[0].mark == Mark::O));
}

#[test]
fn run_against_custom_opponent() {
    let config = TrainingConfig::new(100).with_block_size(25);
    let mut pipeline = TrainingPipeline::new(config).unwrap();
    let mut agent = MenaceAgent::new().with_seed(1);
    let mut opponent = UniformRandomPolicy::with_seed(2).named("Sparring");

    let result = pipeline.run_against(&mut agent, &mut opponent).unwrap();
    assert_eq!(result.win_rate_trend.len(), 4);
    assert_eq!(agent.games_trained(), 100);
}

#[test]
fn invalid_configs_are_rejected_before_play() {
    for config in [
        TrainingConfig::new(0),
        TrainingConfig::new(10).with_initial_weight(0),
        TrainingConfig::new(10).with_block_size(0),
    ] {
        assert!(matches!(
            TrainingPipeline::new(config),
            Err(Error::InvalidConfiguration { .. })
        ));
    }
}

#[test]
fn training_result_serializes_to_json() {
    let config = TrainingConfig::new(10).with_block_size(5).with_seed(1);
    let (_, result) = TrainingPipeline::new(config).unwrap().run().unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["total_games"], 10);
    assert_eq!(json["win_rate_trend"].as_array().unwrap().len(), 2);
}
