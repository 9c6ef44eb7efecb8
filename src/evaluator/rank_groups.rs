use crate::cards::{Card, Rank};

/// Rank -> count table plus the distinct ranks in descending order.
///
/// Role selection is by explicit rank order: when several ranks qualify for
/// the same role the numerically higher one wins, independent of input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    counts: [u8; 15],
    distinct_desc: Vec<Rank>,
}

impl RankGroups {
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut counts = [0u8; 15];
        for c in cards {
            counts[c.rank().value() as usize] += 1;
        }
        Self::from_counts(&counts)
    }

    /// Build from a count table indexed by rank value (2..=14).
    pub fn from_counts(counts: &[u8; 15]) -> Self {
        let distinct_desc =
            Rank::ALL.iter().rev().copied().filter(|r| counts[r.value() as usize] > 0).collect();
        Self { counts: *counts, distinct_desc }
    }

    pub fn count(&self, rank: Rank) -> u8 {
        self.counts[rank.value() as usize]
    }

    /// Bitmask of present ranks, bit `v` set for rank value `v`.
    pub fn mask(&self) -> u16 {
        self.distinct_desc.iter().fold(0u16, |m, r| m | (1 << r.value()))
    }

    fn highest_with(&self, min: u8, exclude: Option<Rank>) -> Option<Rank> {
        self.distinct_desc
            .iter()
            .copied()
            .find(|&r| Some(r) != exclude && self.count(r) >= min)
    }

    pub fn quad(&self) -> Option<Rank> {
        self.highest_with(4, None)
    }

    /// Highest rank appearing at least three times.
    pub fn trips(&self) -> Option<Rank> {
        self.highest_with(3, None)
    }

    /// Trips rank and the best other rank that can fill the pair slot
    /// (a second set of trips degrades to a pair here).
    pub fn full_house(&self) -> Option<(Rank, Rank)> {
        let trips = self.trips()?;
        let pair = self.highest_with(2, Some(trips))?;
        Some((trips, pair))
    }

    /// Ranks appearing exactly twice, highest first.
    pub fn pairs(&self) -> Vec<Rank> {
        self.distinct_desc.iter().copied().filter(|&r| self.count(r) == 2).collect()
    }

    /// The `n` highest distinct ranks not already used by the category.
    pub fn kickers(&self, used: &[Rank], n: usize) -> Vec<Rank> {
        self.distinct_desc.iter().copied().filter(|r| !used.contains(r)).take(n).collect()
    }
}
