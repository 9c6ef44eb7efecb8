//! holdem-rs: a Texas Hold'em table engine
//!
//! - A seven-card evaluator producing totally ordered hand scores
//! - A betting-round state machine with blinds, turn order and street progression
//! - Pot settlement with per-participant caps, split pots and refunds
//!
//! Invalid input never panics; recoverable failures are `Result`s.
//!
//! ## Quick start: score a Hold'em hand
//! ```
//! use holdem_rs::evaluator::{evaluate_holdem, Category};
//! use holdem_rs::hand::{Board, HoleCards};
//!
//! let hole: HoleCards = "As Ah".parse().unwrap();
//! let board: Board = "Kc Qd Jh 3s 2c".parse().unwrap();
//!
//! let score = evaluate_holdem(&hole, &board).unwrap();
//! assert_eq!(score.category(), Category::Pair);
//! assert_eq!(score.tiebreaks(), &[14, 13, 12, 11]);
//! ```
//!
//! ## Driving a table
//! ```
//! use holdem_rs::betting::Action;
//! use holdem_rs::config::TableConfig;
//! use holdem_rs::table::{Street, Table};
//!
//! let mut table = Table::new(TableConfig::default().with_seed(1)).unwrap();
//! for name in ["Ann", "Bo", "Cy"] {
//!     table.seat(name);
//! }
//! table.new_hand().unwrap();
//! while let Some(id) = table.next_to_act() {
//!     table.submit_action(id, Action::Fold).unwrap();
//! }
//! assert_eq!(table.street(), Street::FoldWin);
//! let payouts = table.settle().unwrap();
//! assert_eq!(payouts.iter().map(|p| p.amount).sum::<u64>(), 7);
//! ```
//!
//! ## Bots
//! Run a bot session with:
//! ```sh
//! cargo run --bin holdem -- --players 5 --seed 7
//! ```

pub mod agents;
pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod hand;
pub mod participant;
pub mod session;
pub mod settlement;
pub mod table;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
