use super::rank_groups::RankGroups;
use super::straight_info::straight_high;
use super::suit_info::SuitInfo;
use crate::cards::{Card, Rank};
use crate::evaluator::{Category, HandScore};

/// Tables built once per evaluation and shared by every category detector.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    pub rank_groups: RankGroups,
    pub suit_info: SuitInfo,
}

impl HandAnalysis {
    pub fn new(cards: &[Card]) -> Self {
        Self { rank_groups: RankGroups::from_cards(cards), suit_info: SuitInfo::from_cards(cards) }
    }

    /// Highest straight flush over all suits holding five or more cards.
    pub fn straight_flush_high(&self) -> Option<Rank> {
        self.suit_info.flush_suits().filter_map(|s| straight_high(self.suit_info.mask(s))).max()
    }

    pub fn straight_high(&self) -> Option<Rank> {
        straight_high(self.rank_groups.mask())
    }

    pub fn score(&self, category: Category, tiebreaks: &[Rank]) -> HandScore {
        HandScore::new(category, tiebreaks)
    }
}
