//! Observer implementations for training pipelines
//!
//! Observers collect data during training without coupling training logic to
//! any particular presentation.

use std::sync::{Arc, Mutex};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    menace::Outcome,
    ports::Observer,
    tictactoe::{GameState, Mark},
    utils::rate,
};

/// Observation of a single move during a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepObservation {
    pub step_num: usize,
    pub mark: Mark,
    pub position: usize,
    /// State key after the move was applied
    pub state: String,
}

/// Complete observation of a training game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub game_num: usize,
    pub outcome: Outcome,
    pub steps: Vec<StepObservation>,
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} D:{} L:{}", self.wins, self.draws, self.losses)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: Outcome) -> Result<()> {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks training metrics
///
/// The final summary is also published on training end to the handle from
/// [`MetricsObserver::summary_handle`].
#[derive(Debug, Default)]
pub struct MetricsObserver {
    wins: usize,
    draws: usize,
    losses: usize,
    total_games: usize,
    move_counts: Vec<usize>,
    block_win_rates: Vec<f64>,
    published: Arc<Mutex<MetricsSummary>>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current win rate
    pub fn win_rate(&self) -> f64 {
        rate(self.wins, self.total_games)
    }

    /// Get current draw rate
    pub fn draw_rate(&self) -> f64 {
        rate(self.draws, self.total_games)
    }

    /// Get current loss rate
    pub fn loss_rate(&self) -> f64 {
        rate(self.losses, self.total_games)
    }

    /// Get average game length
    pub fn avg_game_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.total_games,
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            win_rate: self.win_rate(),
            draw_rate: self.draw_rate(),
            loss_rate: self.loss_rate(),
            avg_game_length: self.avg_game_length(),
            block_win_rates: self.block_win_rates.clone(),
        }
    }

    /// Shared handle filled with the summary when training ends
    pub fn summary_handle(&self) -> Arc<Mutex<MetricsSummary>> {
        Arc::clone(&self.published)
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    pub avg_game_length: f64,
    pub block_win_rates: Vec<f64>,
}

impl Observer for MetricsObserver {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.move_counts.push(0);
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _state: &GameState,
        _mark: Mark,
        _position: usize,
    ) -> Result<()> {
        if let Some(last) = self.move_counts.last_mut() {
            *last += 1;
        }
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, outcome: Outcome) -> Result<()> {
        self.total_games += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
        Ok(())
    }

    fn on_block_end(&mut self, _block_num: usize, win_rate: f64) -> Result<()> {
        self.block_win_rates.push(win_rate);
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Ok(mut published) = self.published.lock() {
            *published = self.summary();
        }
        Ok(())
    }
}

/// Records every game move by move into a shared buffer.
///
/// The pipeline owns its observers, so the recording is read back through
/// the handle returned by [`RecordingObserver::observations`].
#[derive(Debug, Default)]
pub struct RecordingObserver {
    observations: Arc<Mutex<Vec<Observation>>>,
    current_steps: Vec<StepObservation>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the recorded games
    pub fn observations(&self) -> Arc<Mutex<Vec<Observation>>> {
        Arc::clone(&self.observations)
    }
}

impl Observer for RecordingObserver {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.current_steps.clear();
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        step_num: usize,
        state: &GameState,
        mark: Mark,
        position: usize,
    ) -> Result<()> {
        self.current_steps.push(StepObservation {
            step_num,
            mark,
            position,
            state: state.state_key(),
        });
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: Outcome) -> Result<()> {
        let observation = Observation {
            game_num,
            outcome,
            steps: std::mem::take(&mut self.current_steps),
        };
        if let Ok(mut observations) = self.observations.lock() {
            observations.push(observation);
        }
        Ok(())
    }
}
