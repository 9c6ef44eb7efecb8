use crate::cards::Card;
use crate::evaluator::HandScore;
use crate::hand::HoleCards;
use std::fmt;

/// Stable identity of a seated participant; survives roster changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticipantId(pub u32);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-hand position and status flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct SeatFlags {
    pub dealer: bool,
    pub small_blind: bool,
    pub big_blind: bool,
    pub all_in: bool,
    pub folded: bool,
    pub eliminated: bool,
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Participant {
    pub(crate) id: ParticipantId,
    pub(crate) name: String,
    pub(crate) stack: u64,
    pub(crate) bet: u64,
    pub(crate) committed: u64,
    pub(crate) flags: SeatFlags,
    pub(crate) hole: Option<HoleCards>,
    pub(crate) cards: Vec<Card>,
    pub(crate) score: Option<HandScore>,
    pub(crate) cap: u64,
}

impl Participant {
    pub(crate) fn new(id: ParticipantId, name: impl Into<String>, stack: u64) -> Self {
        Self {
            id,
            name: name.into(),
            stack,
            bet: 0,
            committed: 0,
            flags: SeatFlags::default(),
            hole: None,
            cards: Vec::new(),
            score: None,
            cap: 0,
        }
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Chips behind, not counting the current street's bet.
    pub fn stack(&self) -> u64 {
        self.stack
    }

    /// Amount put in on the current street.
    pub fn bet(&self) -> u64 {
        self.bet
    }

    /// Total put in this hand, including the current street.
    pub fn contributed(&self) -> u64 {
        self.committed + self.bet
    }

    pub fn flags(&self) -> SeatFlags {
        self.flags
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    /// Private cards plus the shared cards revealed so far.
    pub fn evaluation_set(&self) -> &[Card] {
        &self.cards
    }

    /// Hand score, available once the hand reaches showdown.
    pub fn score(&self) -> Option<HandScore> {
        self.score
    }

    /// Most of the pool this participant can win, as of the last closed street.
    pub fn cap(&self) -> u64 {
        self.cap
    }

    /// Still contesting the pool: dealt in and neither folded nor eliminated.
    pub fn is_contesting(&self) -> bool {
        self.hole.is_some() && !self.flags.folded && !self.flags.eliminated
    }

    /// Contesting and still holding chips to act with.
    pub fn can_act(&self) -> bool {
        self.is_contesting() && !self.flags.all_in
    }

    pub(crate) fn reset_for_hand(&mut self) {
        self.bet = 0;
        self.committed = 0;
        self.flags = SeatFlags { eliminated: self.stack == 0, ..SeatFlags::default() };
        self.hole = None;
        self.cards.clear();
        self.score = None;
        self.cap = 0;
    }

    /// Move chips from the stack into the street bet; returns the amount moved.
    pub(crate) fn commit(&mut self, amount: u64) -> u64 {
        let pay = amount.min(self.stack);
        self.stack -= pay;
        self.bet += pay;
        if self.stack == 0 {
            self.flags.all_in = true;
        }
        pay
    }

    pub(crate) fn refresh_cards(&mut self, board: &[Card]) {
        self.cards.clear();
        if let Some(hole) = self.hole {
            self.cards.extend(hole.as_array());
            self.cards.extend_from_slice(board);
        }
    }
}
