use crate::cards::Rank;

const ACE_BIT: u16 = 1 << 14;
// Bit 1 stands in for the ace when it plays low.
const LOW_ACE_BIT: u16 = 1 << 1;

/// Highest straight in a rank bitmask (bit `v` set for rank value `v`).
///
/// Candidate high cards are scanned from Ace down to Five; the first complete
/// run wins, so the wheel (5-4-3-2-A) reports Five.
pub fn straight_high(mask: u16) -> Option<Rank> {
    let mask = if mask & ACE_BIT != 0 { mask | LOW_ACE_BIT } else { mask };
    (5u8..=14).rev().find_map(|high| {
        let run = 0b1_1111u16 << (high - 4);
        if mask & run == run {
            Rank::from_value(high)
        } else {
            None
        }
    })
}
