//! The hand state machine: blinds, dealing, turn order, street progression
//! and settlement for one table.

use crate::betting::{self, Action, ActionError, Resolution};
use crate::cards::Card;
use crate::config::TableConfig;
use crate::deck::Deck;
use crate::error::EngineError;
use crate::evaluator::{evaluate, Category};
use crate::hand::{Board, HoleCards};
use crate::participant::{Participant, ParticipantId};
use crate::settlement::{self, AwardKind, Stake};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    /// Everyone but one participant folded.
    FoldWin,
}

impl Street {
    pub fn is_terminal(self) -> bool {
        matches!(self, Street::Showdown | Street::FoldWin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandHistoryVerb {
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    Bet,
    RaiseTo,
    Win,
    Split,
    Refund,
    /// Board cards dealt for a new street; recorded against the dealer.
    Deal,
    Showdown,
}

impl HandHistoryVerb {
    pub fn label(self) -> &'static str {
        match self {
            HandHistoryVerb::SmallBlind => "SB",
            HandHistoryVerb::BigBlind => "BB",
            HandHistoryVerb::Fold => "Fold",
            HandHistoryVerb::Check => "Check",
            HandHistoryVerb::Call => "Call",
            HandHistoryVerb::Bet => "Bet",
            HandHistoryVerb::RaiseTo => "Raise to",
            HandHistoryVerb::Win => "Win",
            HandHistoryVerb::Split => "Split",
            HandHistoryVerb::Refund => "Refund",
            HandHistoryVerb::Deal => "Deal",
            HandHistoryVerb::Showdown => "Showdown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandHistoryEntry {
    pub participant: ParticipantId,
    pub verb: HandHistoryVerb,
    pub amount: Option<u64>,
    pub street: Street,
}

/// Chips credited to a participant when a hand is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payout {
    pub participant: ParticipantId,
    pub amount: u64,
    /// Category of the winning hand; `None` for fold wins and refunds.
    pub category: Option<Category>,
    pub kind: AwardKind,
}

#[derive(Debug, Clone)]
pub struct Table {
    pub(crate) config: TableConfig,
    rng: ChaCha8Rng,
    deck: Deck,
    pub(crate) board: Board,
    pub(crate) participants: Vec<Participant>,
    next_id: u32,
    pub(crate) street: Street,
    in_hand: bool,
    pub(crate) pool: u64,
    pub(crate) requirement: u64,
    pending: usize,
    cursor: usize,
    button: Option<usize>,
    blinds: (usize, usize),
    hand_number: u64,
    history: Vec<HandHistoryEntry>,
}

impl Table {
    pub fn new(config: TableConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        };
        Ok(Self {
            config,
            rng,
            deck: Deck::standard(),
            board: Board::default(),
            participants: Vec::new(),
            next_id: 1,
            street: Street::Preflop,
            in_hand: false,
            pool: 0,
            requirement: 0,
            pending: 0,
            cursor: 0,
            button: None,
            blinds: (0, 0),
            hand_number: 0,
            history: Vec::new(),
        })
    }

    /// Add a participant with the configured starting stack.
    pub fn seat(&mut self, name: impl Into<String>) -> ParticipantId {
        let stack = self.config.starting_stack;
        self.seat_with_stack(name, stack)
    }

    pub fn seat_with_stack(&mut self, name: impl Into<String>, stack: u64) -> ParticipantId {
        let id = ParticipantId(self.next_id);
        self.next_id += 1;
        let p = Participant::new(id, name, stack);
        info!(participant = %id, name = %p.name, stack, "seated");
        self.participants.push(p);
        id
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Chips collected from closed streets.
    pub fn pool(&self) -> u64 {
        self.pool
    }

    /// Street total every participant must reach to stay in.
    pub fn requirement(&self) -> u64 {
        self.requirement
    }

    /// Participants who still have to act before the street closes.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn in_hand(&self) -> bool {
        self.in_hand
    }

    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    pub fn dealer(&self) -> Option<ParticipantId> {
        self.button.and_then(|i| self.participants.get(i)).map(|p| p.id)
    }

    pub fn cards_remaining(&self) -> usize {
        self.deck.len()
    }

    pub fn to_call(&self, id: ParticipantId) -> u64 {
        self.participant(id).map_or(0, |p| self.requirement.saturating_sub(p.bet))
    }

    pub fn history(&self) -> &[HandHistoryEntry] {
        &self.history
    }

    pub fn history_recent(&self, n: usize) -> &[HandHistoryEntry] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    /// Participants left with an empty stack after the last settlement.
    pub fn busted(&self) -> Vec<ParticipantId> {
        self.participants.iter().filter(|p| p.stack == 0).map(|p| p.id).collect()
    }

    fn index_of(&self, id: ParticipantId) -> Option<usize> {
        self.participants.iter().position(|p| p.id == id)
    }

    fn seated_count(&self) -> usize {
        self.participants.iter().filter(|p| !p.flags.eliminated).count()
    }

    /// Next seat after `from` that is not eliminated.
    fn next_seated(&self, from: usize) -> usize {
        let n = self.participants.len();
        (1..=n).map(|k| (from + k) % n).find(|&i| !self.participants[i].flags.eliminated).unwrap_or(from)
    }

    /// First seat at or after `start` that can still act.
    fn first_actor_from(&self, start: usize) -> usize {
        let n = self.participants.len();
        (0..n).map(|k| (start + k) % n).find(|&i| self.participants[i].can_act()).unwrap_or(start % n)
    }

    fn record(&mut self, idx: usize, verb: HandHistoryVerb, amount: Option<u64>) {
        let participant = self.participants[idx].id;
        self.history.push(HandHistoryEntry { participant, verb, amount, street: self.street });
    }

    fn record_street(&mut self, verb: HandHistoryVerb, amount: Option<u64>) {
        if let Some(dealer) = self.button {
            self.record(dealer, verb, amount);
        }
    }

    /// Start a hand: rotate the button, post blinds, shuffle and deal.
    pub fn new_hand(&mut self) -> Result<(), EngineError> {
        if self.in_hand {
            return Err(EngineError::HandInProgress);
        }
        for p in &mut self.participants {
            p.reset_for_hand();
        }
        let seated = self.seated_count();
        if seated < self.config.min_players {
            warn!(seated, required = self.config.min_players, "not enough players for a hand");
            return Err(EngineError::InsufficientRoster {
                remaining: seated,
                required: self.config.min_players,
            });
        }

        let n = self.participants.len();
        let dealer = match self.button {
            Some(d) => self.next_seated(d),
            None => {
                let r = self.rng.random_range(0..n);
                self.next_seated((r + n - 1) % n)
            }
        };
        let sb = self.next_seated(dealer);
        let bb = self.next_seated(sb);
        self.button = Some(dealer);
        self.blinds = (sb, bb);
        self.participants[dealer].flags.dealer = true;
        self.participants[sb].flags.small_blind = true;
        self.participants[bb].flags.big_blind = true;

        self.hand_number += 1;
        self.history.clear();
        self.board.clear();
        self.pool = 0;
        self.street = Street::Preflop;
        self.in_hand = true;
        self.deck = Deck::standard();
        self.deck.shuffle_with(&mut self.rng);
        info!(
            hand = self.hand_number,
            dealer = %self.participants[dealer].id,
            players = seated,
            "hand started"
        );

        self.post_blind(sb, self.config.small_blind, HandHistoryVerb::SmallBlind);
        self.post_blind(bb, self.config.big_blind, HandHistoryVerb::BigBlind);
        self.requirement = self.config.big_blind;

        self.deal_hole_cards(sb)?;
        self.open_street(bb + 1);
        Ok(())
    }

    fn post_blind(&mut self, idx: usize, amount: u64, verb: HandHistoryVerb) {
        let paid = self.participants[idx].commit(amount);
        debug!(participant = %self.participants[idx].id, blind = verb.label(), paid, "blind posted");
        self.record(idx, verb, Some(paid));
    }

    /// Two passes round the table, one card each, starting at `first`.
    fn deal_hole_cards(&mut self, first: usize) -> Result<(), EngineError> {
        let n = self.participants.len();
        let order: Vec<usize> = (0..n)
            .map(|k| (first + k) % n)
            .filter(|&i| !self.participants[i].flags.eliminated)
            .collect();
        let first_pass: Vec<Card> = order.iter().map(|_| self.deck.draw()).collect::<Result<_, _>>()?;
        let second_pass: Vec<Card> = order.iter().map(|_| self.deck.draw()).collect::<Result<_, _>>()?;
        for ((&i, a), b) in order.iter().zip(first_pass).zip(second_pass) {
            let p = &mut self.participants[i];
            p.hole = Some(HoleCards::try_new(a, b)?);
            p.refresh_cards(&[]);
        }
        Ok(())
    }

    /// Begin betting on the current street with the first actor at or after `start`.
    fn open_street(&mut self, start: usize) {
        let can_act = self.participants.iter().filter(|p| p.can_act()).count();
        self.pending = if can_act >= 2 {
            can_act
        } else {
            let requirement = self.requirement;
            self.participants.iter().filter(|p| p.can_act() && p.bet < requirement).count()
        };
        self.cursor = self.first_actor_from(start);
        debug!(
            street = ?self.street,
            pending = self.pending,
            requirement = self.requirement,
            "street opened"
        );
        if self.pending == 0 {
            self.close_street();
        }
    }

    /// Move street bets into the pool and recompute every cap.
    fn close_street(&mut self) {
        for p in &mut self.participants {
            p.committed += p.bet;
            self.pool += p.bet;
            p.bet = 0;
        }
        let caps = settlement::caps(&self.stakes());
        for (p, cap) in self.participants.iter_mut().zip(caps) {
            p.cap = cap;
            if p.is_contesting() {
                debug!(participant = %p.id, committed = p.committed, cap, "cap updated");
            }
        }
        self.pending = 0;
        self.requirement = 0;
        debug!(street = ?self.street, pool = self.pool, "street closed");
    }

    fn stakes(&self) -> Vec<Stake> {
        self.participants
            .iter()
            .map(|p| Stake { contributed: p.contributed(), contesting: p.is_contesting(), score: p.score })
            .collect()
    }

    /// Whose turn it is, or `None` once the street is closed or the hand is over.
    pub fn next_to_act(&self) -> Option<ParticipantId> {
        if !self.in_hand || self.street.is_terminal() || self.pending == 0 {
            return None;
        }
        self.participants.get(self.cursor).filter(|p| p.can_act()).map(|p| p.id)
    }

    fn reject(&self, id: ParticipantId, action: Action, err: ActionError) -> EngineError {
        warn!(participant = %id, %action, error = %err, "action rejected");
        EngineError::InvalidAction(err)
    }

    /// Apply `action` for `id`. Rejected actions leave the table untouched.
    pub fn submit_action(&mut self, id: ParticipantId, action: Action) -> Result<(), EngineError> {
        if !self.in_hand || self.street.is_terminal() {
            return Err(self.reject(id, action, ActionError::HandOver));
        }
        let Some(idx) = self.index_of(id) else {
            return Err(self.reject(id, action, ActionError::UnknownParticipant(id)));
        };
        let Some(expected) = self.next_to_act() else {
            return Err(self.reject(id, action, ActionError::StreetClosed));
        };
        if expected != id {
            return Err(self.reject(id, action, ActionError::NotYourTurn { expected, got: id }));
        }
        let (bet, stack) = (self.participants[idx].bet, self.participants[idx].stack);
        let resolution = match betting::resolve(action, bet, stack, self.requirement) {
            Ok(r) => r,
            Err(err) => return Err(self.reject(id, action, err)),
        };

        self.pending = self.pending.saturating_sub(1);
        match resolution {
            Resolution::Fold => {
                self.participants[idx].flags.folded = true;
                self.record(idx, HandHistoryVerb::Fold, None);
            }
            Resolution::Check => self.record(idx, HandHistoryVerb::Check, None),
            Resolution::Call { to, all_in } => {
                self.participants[idx].commit(to - bet);
                self.record(idx, HandHistoryVerb::Call, Some(to));
                debug!(participant = %id, to, all_in, "called");
            }
            Resolution::Raise { to, all_in } => {
                self.participants[idx].commit(to - bet);
                if to > self.requirement {
                    let verb =
                        if self.requirement == 0 { HandHistoryVerb::Bet } else { HandHistoryVerb::RaiseTo };
                    self.record(idx, verb, Some(to));
                    self.requirement = to;
                    self.pending = self
                        .participants
                        .iter()
                        .enumerate()
                        .filter(|&(i, p)| i != idx && p.can_act())
                        .count();
                } else {
                    self.record(idx, HandHistoryVerb::Call, Some(to));
                }
                debug!(participant = %id, to, all_in, pending = self.pending, "raised");
            }
        }
        debug!(participant = %id, %action, street = ?self.street, "action applied");

        if self.participants.iter().filter(|p| p.is_contesting()).count() <= 1 {
            self.close_street();
            self.street = Street::FoldWin;
            info!(hand = self.hand_number, "all but one folded");
            return Ok(());
        }
        if !self.participants.iter().any(|p| p.can_act()) {
            self.pending = 0;
        }
        if self.pending == 0 {
            self.close_street();
        } else {
            self.cursor = self.first_actor_from(idx + 1);
        }
        Ok(())
    }

    /// Deal the next street once betting has closed: burn, then three cards
    /// for the flop and one each for turn and river. After the river the
    /// hand moves to showdown and every contestant is scored.
    pub fn advance_street(&mut self) -> Result<Street, EngineError> {
        if !self.in_hand {
            return Err(EngineError::NoHandInProgress);
        }
        if self.street.is_terminal() {
            return Ok(self.street);
        }
        if self.pending > 0 {
            return Err(EngineError::BettingOpen { pending: self.pending });
        }
        let (next, count) = match self.street {
            Street::Preflop => (Street::Flop, 3),
            Street::Flop => (Street::Turn, 1),
            Street::Turn => (Street::River, 1),
            _ => (Street::Showdown, 0),
        };
        if next == Street::Showdown {
            self.street = Street::Showdown;
            for p in self.participants.iter_mut().filter(|p| p.is_contesting()) {
                let seven: Option<[Card; 7]> = p.cards.as_slice().try_into().ok();
                p.score = seven.map(|cards| evaluate(&cards));
                if let Some(score) = p.score {
                    debug!(participant = %p.id, %score, "scored");
                }
            }
            self.record_street(HandHistoryVerb::Showdown, None);
            info!(hand = self.hand_number, board = %self.board, "showdown");
            return Ok(self.street);
        }

        self.deck.burn()?;
        let cards = self.deck.draw_n(count)?;
        debug!(street = ?next, dealt = count, remaining = self.deck.len(), "burned and dealt");
        self.board.extend(cards);
        let board = self.board.as_slice().to_vec();
        for p in self.participants.iter_mut().filter(|p| p.is_contesting()) {
            p.refresh_cards(&board);
        }
        self.street = next;
        self.record_street(HandHistoryVerb::Deal, Some(count as u64));
        info!(hand = self.hand_number, street = ?next, board = %self.board, "street dealt");
        self.open_street(self.blinds.0);
        Ok(self.street)
    }

    /// Pay out the pool once the hand has reached showdown or a fold win.
    pub fn settle(&mut self) -> Result<Vec<Payout>, EngineError> {
        if !self.in_hand {
            return Err(EngineError::NoHandInProgress);
        }
        if !self.street.is_terminal() {
            return Err(EngineError::NotSettleable(self.street));
        }
        let awards = settlement::distribute(&self.stakes(), self.pool);

        let mut merged: BTreeMap<(usize, bool), (u64, AwardKind)> = BTreeMap::new();
        for a in awards {
            let refund = a.kind == AwardKind::Refund;
            let entry = merged.entry((a.seat, refund)).or_insert((0, a.kind));
            entry.0 += a.amount;
            if a.kind == AwardKind::Split {
                entry.1 = AwardKind::Split;
            }
        }

        let mut payouts = Vec::with_capacity(merged.len());
        for ((seat, _), (amount, kind)) in merged {
            let category = match kind {
                AwardKind::Refund => None,
                _ => self.participants[seat].score.map(|s| s.category()),
            };
            self.participants[seat].stack += amount;
            let verb = match kind {
                AwardKind::Split => HandHistoryVerb::Split,
                AwardKind::Refund => HandHistoryVerb::Refund,
                _ => HandHistoryVerb::Win,
            };
            self.record(seat, verb, Some(amount));
            let participant = self.participants[seat].id;
            info!(
                hand = self.hand_number,
                %participant,
                amount,
                kind = verb.label(),
                category = category.map(Category::name).unwrap_or("-"),
                "payout"
            );
            payouts.push(Payout { participant, amount, category, kind });
        }
        self.pool = 0;
        self.in_hand = false;
        Ok(payouts)
    }

    /// Restore a busted participant's stack by the configured rebuy amount.
    pub fn rebuy(&mut self, id: ParticipantId) -> Result<(), EngineError> {
        if self.in_hand {
            return Err(EngineError::HandInProgress);
        }
        let idx = self.index_of(id).ok_or(ActionError::UnknownParticipant(id))?;
        let amount = self.config.rebuy_amount;
        let p = &mut self.participants[idx];
        if p.stack > 0 {
            warn!(participant = %id, stack = p.stack, "rebuy refused");
            return Err(EngineError::RebuyNotAllowed { id, stack: p.stack });
        }
        p.stack += amount;
        p.flags.eliminated = false;
        info!(participant = %id, amount, stack = p.stack, "rebuy");
        Ok(())
    }

    /// Remove a participant between hands. The seat is kept, eliminated, when
    /// removing it would leave fewer than the minimum number of players.
    pub fn retire(&mut self, id: ParticipantId) -> Result<(), EngineError> {
        if self.in_hand {
            return Err(EngineError::HandInProgress);
        }
        let idx = self.index_of(id).ok_or(ActionError::UnknownParticipant(id))?;
        let remaining = self.participants.len() - 1;
        if remaining < self.config.min_players {
            self.participants[idx].flags.eliminated = true;
            warn!(participant = %id, remaining, "roster too small to continue");
            return Err(EngineError::InsufficientRoster {
                remaining,
                required: self.config.min_players,
            });
        }
        let p = self.participants.remove(idx);
        info!(participant = %id, name = %p.name, "left the table");
        if let Some(d) = self.button {
            let n = self.participants.len();
            self.button = Some(if idx < d {
                d - 1
            } else if idx == d {
                (idx + n - 1) % n
            } else {
                d
            });
        }
        Ok(())
    }
}
