//! Training pipeline for the MENACE agent

use serde::{Deserialize, Serialize};

use super::opponents::UniformRandomPolicy;
use crate::{
    Error, Result,
    menace::{DEFAULT_INITIAL_WEIGHT, MenaceAgent, Outcome, ReinforcementValues},
    ports::{Observer, Policy},
    tictactoe::{EpisodeRunner, GameState, Mark},
    utils::rate,
};

/// Default number of games per win-rate block
pub const DEFAULT_BLOCK_SIZE: usize = 100;

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training games
    pub num_games: usize,

    /// Beads per legal move in a newly opened matchbox
    pub initial_weight: u32,

    /// Games per win-rate block
    pub block_size: usize,

    /// Which mark the learning agent plays
    pub agent_mark: Mark,

    /// Which mark opens every game
    pub first_mark: Mark,

    /// Random seed
    pub seed: Option<u64>,

    /// Bead adjustments for win, draw and loss
    pub reinforcement: ReinforcementValues,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_games: 2000,
            initial_weight: DEFAULT_INITIAL_WEIGHT,
            block_size: DEFAULT_BLOCK_SIZE,
            agent_mark: Mark::X,
            first_mark: Mark::X,
            seed: None,
            reinforcement: ReinforcementValues::default(),
        }
    }
}

impl TrainingConfig {
    pub fn new(num_games: usize) -> Self {
        Self {
            num_games,
            ..Self::default()
        }
    }

    pub fn with_initial_weight(mut self, initial_weight: u32) -> Self {
        self.initial_weight = initial_weight;
        self
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_agent_mark(mut self, mark: Mark) -> Self {
        self.agent_mark = mark;
        self
    }

    pub fn with_first_mark(mut self, mark: Mark) -> Self {
        self.first_mark = mark;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_reinforcement(mut self, reinforcement: ReinforcementValues) -> Self {
        self.reinforcement = reinforcement;
        self
    }

    /// Reject configurations that cannot produce a meaningful run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for zero games, zero initial
    /// weight or a zero block size.
    pub fn validate(&self) -> Result<()> {
        if self.num_games == 0 {
            return Err(Error::config("number of games must be positive"));
        }
        if self.initial_weight == 0 {
            return Err(Error::config("initial weight must be positive"));
        }
        if self.block_size == 0 {
            return Err(Error::config("block size must be positive"));
        }
        Ok(())
    }

    /// Build a fresh agent from this configuration, seeded if a seed is set.
    pub fn build_agent(&self) -> Result<MenaceAgent> {
        let mut agent = MenaceAgent::with_initial_weight(self.initial_weight)?
            .with_reinforcement(self.reinforcement);
        if let Some(seed) = self.seed {
            agent.reseed(Some(seed));
        }
        Ok(agent)
    }

    fn build_opponent(&self) -> UniformRandomPolicy {
        match self.seed {
            Some(seed) => UniformRandomPolicy::with_seed(seed.wrapping_add(1)),
            None => UniformRandomPolicy::new(),
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total games played
    pub total_games: usize,

    /// Number of wins
    pub wins: usize,

    /// Number of draws
    pub draws: usize,

    /// Number of losses
    pub losses: usize,

    /// Win rate
    pub win_rate: f64,

    /// Draw rate
    pub draw_rate: f64,

    /// Loss rate
    pub loss_rate: f64,

    /// Games per entry of `win_rate_trend`
    pub block_size: usize,

    /// Wins divided by block size, one entry per completed block
    pub win_rate_trend: Vec<f64>,

    /// Outcome of every game, in play order
    pub outcomes: Vec<Outcome>,
}

impl TrainingResult {
    /// Summarise a sequence of outcomes
    pub fn from_outcomes(outcomes: Vec<Outcome>, block_size: usize) -> Self {
        let count = |wanted: Outcome| outcomes.iter().filter(|&&o| o == wanted).count();
        let total_games = outcomes.len();
        let wins = count(Outcome::Win);
        let draws = count(Outcome::Draw);
        let losses = count(Outcome::Loss);

        let win_rate_trend = if block_size == 0 {
            Vec::new()
        } else {
            outcomes
                .chunks_exact(block_size)
                .map(|block| {
                    let block_wins = block.iter().filter(|&&o| o == Outcome::Win).count();
                    rate(block_wins, block_size)
                })
                .collect()
        };

        Self {
            total_games,
            wins,
            draws,
            losses,
            win_rate: rate(wins, total_games),
            draw_rate: rate(draws, total_games),
            loss_rate: rate(losses, total_games),
            block_size,
            win_rate_trend,
            outcomes,
        }
    }
}

/// Repeats episodes between the learning agent and an opponent, reinforcing
/// after each one and collecting block win rates.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the configuration is rejected
    /// by [`TrainingConfig::validate`]. Nothing has been played at that point.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            observers: Vec::new(),
        })
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train a fresh agent against the uniform-random opponent.
    ///
    /// With a seed set, the agent uses `seed` and the opponent `seed + 1`.
    pub fn run(&mut self) -> Result<(MenaceAgent, TrainingResult)> {
        let mut agent = self.config.build_agent()?;
        let mut opponent = self.config.build_opponent();
        let result = self.run_against(&mut agent, &mut opponent)?;
        Ok((agent, result))
    }

    /// Train `agent` against any opponent policy.
    pub fn run_against(
        &mut self,
        agent: &mut MenaceAgent,
        opponent: &mut dyn Policy,
    ) -> Result<TrainingResult> {
        let num_games = self.config.num_games;
        let block_size = self.config.block_size;

        log::info!(
            "training for {num_games} games as {} against {}",
            self.config.agent_mark,
            opponent.name()
        );

        for observer in &mut self.observers {
            observer.on_training_start(num_games)?;
        }

        let mut state = GameState::new();
        let mut outcomes = Vec::with_capacity(num_games);
        let mut block_wins = 0usize;

        for game_num in 1..=num_games {
            agent.begin_episode();
            let outcome = self.play_game(game_num, &mut state, agent, opponent)?;
            agent.reinforce(outcome);
            outcomes.push(outcome);

            for observer in &mut self.observers {
                observer.on_game_end(game_num, outcome)?;
            }

            if outcome == Outcome::Win {
                block_wins += 1;
            }
            if game_num % block_size == 0 {
                let block_num = game_num / block_size;
                let win_rate = rate(block_wins, block_size);
                log::info!("episode {game_num}: win rate (last {block_size}) = {win_rate:.2}");
                for observer in &mut self.observers {
                    observer.on_block_end(block_num, win_rate)?;
                }
                block_wins = 0;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::from_outcomes(outcomes, block_size))
    }

    fn play_game(
        &mut self,
        game_num: usize,
        state: &mut GameState,
        agent: &mut MenaceAgent,
        opponent: &mut dyn Policy,
    ) -> Result<Outcome> {
        state.reset();
        for observer in &mut self.observers {
            observer.on_game_start(game_num)?;
        }

        let agent_mark = self.config.agent_mark;
        let agent: &mut dyn Policy = agent;
        let (x, o) = match agent_mark {
            Mark::X => (agent, opponent),
            Mark::O => (opponent, agent),
        };

        let observers = &mut self.observers;
        let episode = EpisodeRunner::new(self.config.first_mark).run_observed(
            state,
            x,
            o,
            |step, state, mark, position| {
                for observer in observers.iter_mut() {
                    observer.on_move(game_num, step, state, mark, position)?;
                }
                Ok(())
            },
        )?;

        Outcome::for_mark(episode.terminal, agent_mark).ok_or(Error::EpisodeUnfinished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_games_rejected_before_play() {
        let err = TrainingPipeline::new(TrainingConfig::new(0)).err().unwrap();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
    }

    #[test]
    fn zero_weight_and_block_rejected() {
        assert!(TrainingConfig::new(10).with_initial_weight(0).validate().is_err());
        assert!(TrainingConfig::new(10).with_block_size(0).validate().is_err());
        assert!(TrainingConfig::new(10).validate().is_ok());
    }

    #[test]
    fn trend_has_one_entry_per_full_block() {
        let config = TrainingConfig::new(250).with_block_size(100).with_seed(4);
        let (agent, result) = TrainingPipeline::new(config).unwrap().run().unwrap();
        assert_eq!(result.total_games, 250);
        assert_eq!(result.win_rate_trend.len(), 2);
        assert_eq!(result.outcomes.len(), 250);
        assert_eq!(result.wins + result.draws + result.losses, 250);
        assert!(result.win_rate_trend.iter().all(|r| (0.0..=1.0).contains(r)));
        assert_eq!(agent.games_trained(), 250);
        assert!(agent.history().is_empty());
    }

    #[test]
    fn from_outcomes_uses_block_wins_not_cumulative() {
        let mut outcomes = vec![Outcome::Win; 4];
        outcomes.extend([Outcome::Loss, Outcome::Draw, Outcome::Loss, Outcome::Win]);
        let result = TrainingResult::from_outcomes(outcomes, 4);
        assert_eq!(result.win_rate_trend, vec![1.0, 0.25]);
        assert_eq!(result.wins, 5);
        assert_eq!(result.losses, 2);
        assert_eq!(result.draws, 1);
    }

    /// Always claims the corner, legal or not.
    struct CornerHog;

    impl Policy for CornerHog {
        fn select_move(&mut self, _state: &GameState) -> Result<usize> {
            Ok(0)
        }

        fn name(&self) -> &str {
            "corner hog"
        }
    }

    #[test]
    fn aborted_episode_does_not_leak_into_next_run() {
        let flat = ReinforcementValues {
            win: 1,
            draw: 1,
            loss: 1,
        };
        let empty_key = GameState::new().state_key();
        let mut agent = MenaceAgent::new().with_seed(3).with_reinforcement(flat);
        let mut pipeline = TrainingPipeline::new(TrainingConfig::new(1).with_block_size(1)).unwrap();

        let err = pipeline.run_against(&mut agent, &mut CornerHog).unwrap_err();
        assert!(matches!(err, Error::IllegalMoveAttempted { position: 0, .. }));
        assert!(!agent.history().is_empty());
        assert_eq!(agent.matchbox(&empty_key).unwrap().total_beads(), 90);

        let mut opponent = UniformRandomPolicy::with_seed(4);
        pipeline.run_against(&mut agent, &mut opponent).unwrap();
        // Only the opening move of the finished game is reinforced.
        assert_eq!(agent.matchbox(&empty_key).unwrap().total_beads(), 91);
        assert!(agent.history().is_empty());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = TrainingConfig::new(300).with_seed(99);
        let (_, first) = TrainingPipeline::new(config.clone()).unwrap().run().unwrap();
        let (_, second) = TrainingPipeline::new(config).unwrap().run().unwrap();
        assert_eq!(first.outcomes, second.outcomes);
    }
}
