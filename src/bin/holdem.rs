use clap::{Parser, ValueEnum};
use holdem_rs::agents::{AgentTable, BotAgent, BotProfile, Difficulty};
use holdem_rs::config::TableConfig;
use holdem_rs::session::Session;
use holdem_rs::table::Table;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Level {
    Easy,
    Medium,
    Hard,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Medium => Difficulty::Medium,
            Level::Hard => Difficulty::Hard,
        }
    }
}

/// Run a Texas Hold'em session between bots.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of seated bots
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(3..=22))]
    players: u8,
    /// Stop after this many hands
    #[arg(long, default_value_t = 100)]
    hands: u64,
    /// Seed for shuffles and bot decisions
    #[arg(long)]
    seed: Option<u64>,
    /// Starting stack (also the rebuy amount)
    #[arg(long, default_value_t = 500)]
    stack: u64,
    #[arg(long, default_value_t = 2)]
    small_blind: u64,
    #[arg(long, default_value_t = 5)]
    big_blind: u64,
    #[arg(long, value_enum, default_value_t = Level::Medium)]
    difficulty: Level,
    /// Busted bots leave instead of buying back in
    #[arg(long)]
    no_rebuy: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "holdem_rs=info,holdem=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = TableConfig::default()
        .with_blinds(args.small_blind, args.big_blind)
        .with_starting_stack(args.stack)
        .with_rebuy_amount(args.stack)
        .with_max_hands(args.hands);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut table = match Table::new(config) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "invalid table configuration");
            return ExitCode::FAILURE;
        }
    };
    let mut agents = AgentTable::new();
    for i in 0..args.players {
        let id = table.seat(format!("Bot {}", i + 1));
        let mut profile =
            BotProfile::for_difficulty(args.difficulty.into()).with_rebuy(!args.no_rebuy);
        if let Some(seed) = args.seed {
            profile = profile.with_seed(seed.wrapping_add(u64::from(i) + 1));
        }
        agents.set_agent(id, Box::new(BotAgent::new(profile)));
    }

    info!(version = holdem_rs::VERSION, players = args.players, "starting session");
    let mut session = Session::new(table, agents);
    match session.run() {
        Ok(summary) => {
            println!("{} hands played ({:?})", summary.hands_played, summary.reason);
            for (name, stack) in &summary.standings {
                println!("{name:>10} {stack:>8}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "session aborted");
            ExitCode::FAILURE
        }
    }
}
