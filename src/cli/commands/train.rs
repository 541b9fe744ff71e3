//! Train command - Train a MENACE agent against the random opponent

use anyhow::{Result, anyhow};
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::output::{format_number, format_percent, print_kv, print_section, print_series},
    menace::{AgentStats, DEFAULT_INITIAL_WEIGHT, ReinforcementValues},
    pipeline::{
        DEFAULT_BLOCK_SIZE, MetricsObserver, ProgressObserver, TrainingConfig, TrainingPipeline,
        TrainingResult,
    },
    tictactoe::Mark,
};

#[derive(Debug, Serialize)]
struct TrainingSummary {
    config: TrainingConfig,
    total_games: usize,
    wins: usize,
    draws: usize,
    losses: usize,
    win_rate: f64,
    draw_rate: f64,
    loss_rate: f64,
    avg_game_length: f64,
    win_rate_trend: Vec<f64>,
    agent: AgentStats,
}

impl TrainingSummary {
    fn new(
        config: TrainingConfig,
        result: &TrainingResult,
        avg_game_length: f64,
        agent: AgentStats,
    ) -> Self {
        Self {
            config,
            total_games: result.total_games,
            wins: result.wins,
            draws: result.draws,
            losses: result.losses,
            win_rate: result.win_rate,
            draw_rate: result.draw_rate,
            loss_rate: result.loss_rate,
            avg_game_length,
            win_rate_trend: result.win_rate_trend.clone(),
            agent,
        }
    }
}

pub(crate) fn parse_mark_token(value: &str, flag: &str) -> Result<Mark> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" | "player1" | "p1" => Ok(Mark::X),
        "o" | "second" | "player2" | "p2" => Ok(Mark::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

fn parse_reward_schedule(raw: &str) -> Result<ReinforcementValues> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [win, draw, loss] = parts.as_slice() else {
        return Err(anyhow!(
            "Invalid reward schedule '{raw}' (expected 'win,draw,loss', e.g. '3,1,-1')"
        ));
    };
    Ok(ReinforcementValues {
        win: win.parse()?,
        draw: draw.parse()?,
        loss: loss.parse()?,
    })
}

#[derive(Parser, Debug)]
#[command(about = "Train a MENACE agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Number of training games
    #[arg(long, short = 'g', default_value_t = 2000)]
    pub games: usize,

    /// Beads per legal move in a new matchbox
    #[arg(long, default_value_t = DEFAULT_INITIAL_WEIGHT)]
    pub initial_weight: u32,

    /// Games per win-rate block
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    pub block_size: usize,

    /// Mark played by the agent (x or o)
    #[arg(long, default_value = "x")]
    pub agent: String,

    /// Mark that opens every game (x or o)
    #[arg(long, default_value = "x")]
    pub first: String,

    /// Bead adjustments as 'win,draw,loss'
    #[arg(long)]
    pub reward: Option<String>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Show a progress bar
    #[arg(long)]
    pub progress: bool,
}

/// Execute the train command
pub fn execute(args: TrainArgs) -> Result<()> {
    let reinforcement = match args.reward.as_deref() {
        Some(raw) => parse_reward_schedule(raw)?,
        None => ReinforcementValues::default(),
    };

    let mut config = TrainingConfig::new(args.games)
        .with_initial_weight(args.initial_weight)
        .with_block_size(args.block_size)
        .with_agent_mark(parse_mark_token(&args.agent, "--agent")?)
        .with_first_mark(parse_mark_token(&args.first, "--first")?)
        .with_reinforcement(reinforcement);
    config.seed = args.seed;

    let metrics = MetricsObserver::new();
    let summary_handle = metrics.summary_handle();

    let mut pipeline = TrainingPipeline::new(config.clone())?.with_observer(Box::new(metrics));
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    let (agent, result) = pipeline.run()?;
    let avg_game_length = summary_handle
        .lock()
        .map(|summary| summary.avg_game_length)
        .unwrap_or(0.0);
    let summary = TrainingSummary::new(config, &result, avg_game_length, agent.stats());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_section("MENACE training");
    print_kv("Agent plays", &summary.config.agent_mark.to_string());
    print_kv("Games", &format_number(summary.total_games));
    print_kv("Wins", &format_number(summary.wins));
    print_kv("Draws", &format_number(summary.draws));
    print_kv("Losses", &format_number(summary.losses));
    print_kv("Win rate", &format_percent(summary.win_rate));
    print_kv("Draw rate", &format_percent(summary.draw_rate));
    print_kv("Loss rate", &format_percent(summary.loss_rate));
    print_kv("Avg game length", &format!("{:.2}", summary.avg_game_length));
    print_kv("Matchboxes", &format_number(summary.agent.total_matchboxes));
    print_kv("Empty matchboxes", &format_number(summary.agent.empty_matchboxes));
    print_kv("Avg entropy", &format!("{:.3}", summary.agent.avg_entropy));

    println!(
        "\nWin rate per block of {} games:",
        summary.config.block_size
    );
    print_series(&summary.win_rate_trend, 10);
    Ok(())
}
