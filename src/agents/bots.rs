use crate::betting::Action;
use crate::cards::Card;
use crate::engine::TableView;
use crate::evaluator::evaluate_cards;
use crate::hand::{Board, HoleCards};
use crate::participant::ParticipantId;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use super::{AgentKind, PlayerAgent};

/// Difficulty tiers for bot play style and mistake rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Configuration for a bot's play style and randomness.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct BotProfile {
    pub difficulty: Difficulty,
    pub tightness: f64,
    pub aggression: f64,
    pub bluff: f64,
    /// Whether the bot buys back in after losing its stack.
    pub rebuy: bool,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    /// Create a profile with tuned defaults for a difficulty tier.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (tightness, aggression, bluff) = match difficulty {
            Difficulty::Easy => (0.3, 0.18, 0.03),
            Difficulty::Medium => (0.5, 0.35, 0.05),
            Difficulty::Hard => (0.65, 0.5, 0.09),
        };
        Self { difficulty, tightness, aggression, bluff, rebuy: true, rng_seed: None }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_rebuy(mut self, rebuy: bool) -> Self {
        self.rebuy = rebuy;
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Medium)
    }
}

#[derive(Clone, Copy)]
struct DecisionParams {
    strength: f64,
    fold_threshold: f64,
    raise_threshold: f64,
    aggression: f64,
    bluff: f64,
}

struct BotContext<'a> {
    seat: usize,
    dealer: usize,
    seats: usize,
    num_players: usize,
    to_call: u64,
    pot: u64,
    requirement: u64,
    big_blind: u64,
    stack: u64,
    bet: u64,
    hole: HoleCards,
    board: &'a Board,
}

impl<'a> BotContext<'a> {
    fn from_view(view: &'a dyn TableView, id: ParticipantId) -> Option<Self> {
        let players = view.participants();
        let seat = players.iter().position(|p| p.id() == id)?;
        let dealer = players.iter().position(|p| p.flags().dealer).unwrap_or(0);
        Some(Self {
            seat,
            dealer,
            seats: players.len(),
            num_players: players.iter().filter(|p| p.is_contesting()).count(),
            to_call: view.to_call(id),
            pot: view.pot(),
            requirement: view.requirement(),
            big_blind: view.big_blind(),
            stack: view.stack(id),
            bet: view.bet(id),
            hole: view.hole_cards(id)?,
            board: view.board(),
        })
    }
}

/// A randomised bot whose style comes from a `BotProfile`.
#[derive(Debug)]
pub struct BotAgent {
    profile: BotProfile,
    rng: StdRng,
}

impl BotAgent {
    pub fn new(profile: BotProfile) -> Self {
        let rng = match profile.rng_seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self { profile, rng }
    }

    pub fn profile(&self) -> &BotProfile {
        &self.profile
    }

    fn params(&mut self, ctx: &BotContext<'_>) -> DecisionParams {
        let p = &self.profile;
        let mistake_rate = match p.difficulty {
            Difficulty::Easy => 0.28,
            Difficulty::Medium => 0.14,
            Difficulty::Hard => 0.06,
        };
        let noise = self.rng.random_range(-1.0..=1.0) * mistake_rate * 0.2;
        let strength = (estimate_strength(&ctx.hole, ctx.board) + noise).clamp(0.0, 1.0);
        let pot_odds = if ctx.to_call == 0 {
            0.0
        } else {
            ctx.to_call as f64 / (ctx.pot + ctx.to_call) as f64
        };
        let late = position_factor(ctx.seat, ctx.dealer, ctx.seats, ctx.num_players);
        let tightness = (p.tightness - late).clamp(0.05, 0.95);
        let aggression = (p.aggression + late).clamp(0.05, 0.95);
        DecisionParams {
            strength,
            fold_threshold: (0.3 + tightness * 0.3 + pot_odds * 0.2).clamp(0.1, 0.9),
            raise_threshold: (0.7 - aggression * 0.25).clamp(0.15, 0.9),
            aggression,
            bluff: p.bluff.clamp(0.0, 0.5),
        }
    }

    fn choose(&mut self, ctx: &BotContext<'_>) -> Action {
        let params = self.params(ctx);
        let roll: f64 = self.rng.random();
        if ctx.to_call > 0 {
            if params.strength < params.fold_threshold && roll > params.bluff {
                return Action::Fold;
            }
            let target = raise_target(ctx, params.strength);
            if params.strength > params.raise_threshold
                && roll < params.aggression
                && target > ctx.requirement
            {
                return Action::Raise(target);
            }
            return Action::Call;
        }
        let value = params.strength > params.raise_threshold && roll < params.aggression;
        let bluff = params.strength < params.fold_threshold && roll < params.bluff;
        match (value || bluff, ctx.requirement) {
            (false, _) => Action::Check,
            (true, 0) => Action::Bet(bet_target(ctx, params.strength)),
            (true, _) => Action::Raise(raise_target(ctx, params.strength)),
        }
    }
}

impl PlayerAgent for BotAgent {
    fn decide(&mut self, view: &dyn TableView, id: ParticipantId) -> Action {
        if view.street().is_terminal() {
            return Action::Check;
        }
        let Some(ctx) = BotContext::from_view(view, id) else {
            return view.passive_action(id);
        };
        let action = self.choose(&ctx);
        debug!(participant = %id, %action, street = ?view.street(), "bot decided");
        action
    }

    fn wants_rebuy(&mut self, _view: &dyn TableView, _id: ParticipantId) -> bool {
        self.profile.rebuy
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }
}

/// `seat` and `dealer` index a roster of `seats`; `num_players` counts the
/// participants still contesting the hand.
fn position_factor(seat: usize, dealer: usize, seats: usize, num_players: usize) -> f64 {
    if num_players <= 2 || seats == 0 {
        return 0.0;
    }
    let dist = (seat % seats + seats - dealer % seats) % seats;
    let frac = dist as f64 / seats as f64;
    if frac == 0.0 || frac >= 0.7 {
        0.08
    } else if frac <= 0.3 {
        -0.05
    } else {
        0.0
    }
}

fn bet_target(ctx: &BotContext<'_>, strength: f64) -> u64 {
    let max_total = ctx.bet + ctx.stack;
    let factor = if strength > 0.8 { 0.9 } else { 0.5 };
    let size = ((ctx.pot as f64) * factor).round() as u64;
    size.max(ctx.big_blind).min(max_total)
}

fn raise_target(ctx: &BotContext<'_>, strength: f64) -> u64 {
    let max_total = ctx.bet + ctx.stack;
    if strength > 0.9 && ctx.stack <= ctx.pot {
        return max_total;
    }
    let factor = if strength > 0.8 { 1.0 } else { 0.6 };
    let extra = ((ctx.pot.max(ctx.requirement) as f64) * factor).round() as u64;
    (ctx.requirement + extra.max(ctx.big_blind)).min(max_total)
}

fn estimate_strength(hole: &HoleCards, board: &Board) -> f64 {
    if board.is_empty() {
        return preflop_strength(hole);
    }
    let mut cards: Vec<Card> = hole.as_array().to_vec();
    cards.extend_from_slice(board.as_slice());
    match evaluate_cards(&cards) {
        Ok(score) => {
            let base = (score.category().value() - 1) as f64 / 9.0;
            let high = score.tiebreaks().first().copied().unwrap_or(14) as f64 / 14.0;
            (0.25 + base * 0.65 + high * 0.1).min(1.0)
        }
        Err(_) => preflop_strength(hole),
    }
}

fn preflop_strength(hole: &HoleCards) -> f64 {
    let a = hole.first().rank().value() as i32;
    let b = hole.second().rank().value() as i32;
    let high = a.max(b) as f64;
    let low = a.min(b) as f64;
    let gap = (a - b).abs();

    let mut score = (high / 14.0) * 0.5 + (low / 14.0) * 0.1;
    if a == b {
        score += 0.3 + (high / 14.0) * 0.1;
    }
    if hole.first().suit() == hole.second().suit() {
        score += 0.05;
    }
    match gap {
        1 => score += 0.05,
        2 => score += 0.02,
        g if g > 4 => score -= 0.05,
        _ => {}
    }
    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use crate::table::Table;

    fn hole(s: &str) -> HoleCards {
        s.parse().unwrap()
    }

    #[test]
    fn pairs_and_broadways_outrank_trash_preflop() {
        assert!(preflop_strength(&hole("As Ah")) > preflop_strength(&hole("Kd Qd")));
        assert!(preflop_strength(&hole("Kd Qd")) > preflop_strength(&hole("7c 2d")));
    }

    #[test]
    fn position_uses_roster_distance_after_folds() {
        // Six seats, dealer at 4, three still contesting.
        assert_eq!(position_factor(0, 4, 6, 3), 0.0);
        assert_eq!(position_factor(4, 4, 6, 3), 0.08);
        assert_eq!(position_factor(5, 4, 6, 3), -0.05);
        assert_eq!(position_factor(3, 4, 6, 3), 0.08);
        assert_eq!(position_factor(1, 4, 6, 2), 0.0);
    }

    #[test]
    fn made_hands_raise_strength() {
        let board: Board = "Ac Ad 7h".parse().unwrap();
        let trips = estimate_strength(&hole("As 2c"), &board);
        let air = estimate_strength(&hole("9s 4c"), &board);
        assert!(trips > air);
    }

    #[test]
    fn bot_never_bets_into_an_open_requirement() {
        let mut t = Table::new(TableConfig::default().with_seed(21)).unwrap();
        for name in ["a", "b", "c", "d"] {
            t.seat(name);
        }
        t.new_hand().unwrap();
        let mut bot = BotAgent::new(BotProfile::for_difficulty(Difficulty::Hard).with_seed(7));
        for _ in 0..50 {
            let id = t.next_to_act().unwrap();
            let action = bot.decide(&t, id);
            assert!(!matches!(action, Action::Bet(_)), "got {action}");
            assert_ne!(action, Action::Check, "facing the big blind");
        }
    }

    #[test]
    fn seeded_bots_are_reproducible() {
        let mut t = Table::new(TableConfig::default().with_seed(2)).unwrap();
        for name in ["a", "b", "c"] {
            t.seat(name);
        }
        t.new_hand().unwrap();
        let id = t.next_to_act().unwrap();
        let mut a = BotAgent::new(BotProfile::default().with_seed(99));
        let mut b = BotAgent::new(BotProfile::default().with_seed(99));
        let first: Vec<Action> = (0..20).map(|_| a.decide(&t, id)).collect();
        let second: Vec<Action> = (0..20).map(|_| b.decide(&t, id)).collect();
        assert_eq!(first, second);
    }
}
