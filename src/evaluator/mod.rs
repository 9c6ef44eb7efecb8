pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

use crate::cards::{Card, Rank};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use core::cmp::Ordering;
use detector::DETECTORS;
use hand_analysis::HandAnalysis;
use std::collections::HashSet;
use std::fmt;

/// Hand classes from weakest (1) to strongest (10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 1,
    Pair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl Category {
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }

    /// Number of tiebreak fields a score of this category carries.
    pub const fn tiebreak_len(self) -> usize {
        match self {
            Category::RoyalFlush => 0,
            Category::StraightFlush | Category::Straight => 1,
            Category::FourOfAKind | Category::FullHouse => 2,
            Category::ThreeOfAKind | Category::TwoPair => 3,
            Category::Pair => 4,
            Category::Flush | Category::HighCard => 5,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Totally ordered hand strength: category first, then tiebreak rank values
/// left to right. Equal scores are exact ties.
///
/// Unused tiebreak slots hold zero, which sorts below every rank, so the
/// derived ordering is the lexicographic tuple order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandScore {
    category: Category,
    tiebreaks: [u8; 5],
}

impl HandScore {
    pub(crate) fn new(category: Category, ranks: &[Rank]) -> Self {
        let mut tiebreaks = [0u8; 5];
        for (slot, r) in tiebreaks.iter_mut().zip(ranks.iter().take(category.tiebreak_len())) {
            *slot = r.value();
        }
        Self { category, tiebreaks }
    }

    pub const fn category(&self) -> Category {
        self.category
    }

    /// Tiebreak rank values; the length is fixed by the category.
    pub fn tiebreaks(&self) -> &[u8] {
        &self.tiebreaks[..self.category.tiebreak_len()]
    }

    pub fn tiebreak_ranks(&self) -> Vec<Rank> {
        self.tiebreaks().iter().filter_map(|&v| Rank::from_value(v)).collect()
    }

    /// Pack the score into a `u64` that orders exactly like the score.
    pub fn raw(&self) -> u64 {
        // [ category (8 bits) | t0 (6) | t1 (6) | t2 (6) | t3 (6) | t4 (6) ]
        const RANK_STRIDE: u32 = 6;
        self.tiebreaks
            .iter()
            .fold(self.category as u64, |acc, &t| (acc << RANK_STRIDE) | t as u64)
    }
}

impl fmt::Display for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category)?;
        let ranks = self.tiebreak_ranks();
        if !ranks.is_empty() {
            let parts: Vec<String> = ranks.iter().map(|r| r.to_string()).collect();
            write!(f, " ({})", parts.join(","))?;
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("not enough cards to evaluate: {0}")]
    NotEnoughCards(usize),
    #[error("too many cards to evaluate: {0}")]
    TooManyCards(usize),
    #[error("duplicate cards")]
    DuplicateCards,
}

/// Score a participant's seven available cards (two private + five shared).
///
/// Runs in one pass over the input: a rank count table, a suit count table
/// and the distinct ranks are built once, then categories are tested from
/// strongest to weakest. Input order never affects the result.
///
/// ```
/// use holdem_rs::cards::parse_cards;
/// use holdem_rs::evaluator::{evaluate, Category};
///
/// let cards = parse_cards("7c 7d 7h 2s 2c 9d Ks").unwrap();
/// let seven: [_; 7] = cards.try_into().unwrap();
/// let score = evaluate(&seven);
/// assert_eq!(score.category(), Category::FullHouse);
/// assert_eq!(score.tiebreaks(), &[7, 2]);
/// ```
pub fn evaluate(cards: &[Card; 7]) -> HandScore {
    classify(cards)
}

/// Score any 5..=7 distinct cards with the same single-pass classifier.
pub fn evaluate_cards(cards: &[Card]) -> Result<HandScore, EvalError> {
    match cards.len() {
        n if n < 5 => return Err(EvalError::NotEnoughCards(n)),
        n if n > 7 => return Err(EvalError::TooManyCards(n)),
        _ => {}
    }
    let set: HashSet<Card> = cards.iter().copied().collect();
    if set.len() != cards.len() {
        return Err(EvalError::DuplicateCards);
    }
    Ok(classify(cards))
}

fn classify(cards: &[Card]) -> HandScore {
    let analysis = HandAnalysis::new(cards);
    DETECTORS
        .iter()
        .find_map(|d| d.detect(&analysis))
        .unwrap_or_else(|| HandScore::new(Category::HighCard, &[]))
}

/// Validate a Hold'em holding against a complete board and score it.
///
/// ```
/// use holdem_rs::evaluator::{evaluate_holdem, Category};
/// use holdem_rs::hand::{Board, HoleCards};
///
/// let hole: HoleCards = "As Ah".parse().unwrap();
/// let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let score = evaluate_holdem(&hole, &board).unwrap();
/// assert_eq!(score.category(), Category::Pair);
/// ```
pub fn evaluate_holdem(hole: &HoleCards, board: &Board) -> Result<HandScore, EvalError> {
    validate_holdem(hole, board)?;
    let shared = board.as_slice();
    if shared.len() < Board::MAX_CARDS {
        return Err(EvalError::NotEnoughCards(shared.len() + 2));
    }
    let mut seven = [hole.first(); 7];
    seven[1] = hole.second();
    seven[2..].copy_from_slice(shared);
    Ok(evaluate(&seven))
}

/// Compare two holdings on a shared board.
pub fn compare_holdem(a: &HoleCards, b: &HoleCards, board: &Board) -> Result<Ordering, EvalError> {
    let va = evaluate_holdem(a, board)?;
    let vb = evaluate_holdem(b, board)?;
    Ok(va.cmp(&vb))
}
