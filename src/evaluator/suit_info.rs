use crate::cards::{Card, Rank, Suit};

/// Suit -> count table with a per-suit rank bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitInfo {
    counts: [u8; 4],
    masks: [u16; 4],
}

impl SuitInfo {
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut counts = [0u8; 4];
        let mut masks = [0u16; 4];
        for c in cards {
            let i = c.suit().index();
            counts[i] += 1;
            masks[i] |= 1 << c.rank().value();
        }
        Self { counts, masks }
    }

    /// Suits holding at least five cards, in `Suit::ALL` order.
    pub fn flush_suits(&self) -> impl Iterator<Item = Suit> + '_ {
        Suit::ALL.into_iter().filter(|s| self.counts[s.index()] >= 5)
    }

    pub fn mask(&self, suit: Suit) -> u16 {
        self.masks[suit.index()]
    }

    /// The five highest ranks held in `suit`, descending.
    pub fn top_five(&self, suit: Suit) -> Vec<Rank> {
        let mask = self.mask(suit);
        Rank::ALL.iter().rev().copied().filter(|r| mask & (1 << r.value()) != 0).take(5).collect()
    }
}
