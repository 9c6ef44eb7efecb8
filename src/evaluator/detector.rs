use super::hand_analysis::HandAnalysis;
use crate::cards::Rank;
use crate::evaluator::{Category, HandScore};

/// Strategy pattern: each detector either recognises its category in the
/// analysed cards and builds the score, or declines.
pub trait CategoryDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandScore>;
}

pub struct RoyalFlushDetector;

impl CategoryDetector for RoyalFlushDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandScore> {
        (analysis.straight_flush_high()? == Rank::Ace)
            .then(|| analysis.score(Category::RoyalFlush, &[]))
    }
}

pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandScore> {
        let high = analysis.straight_flush_high()?;
        Some(analysis.score(Category::StraightFlush, &[high]))
    }
}

pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandScore> {
        let quad = analysis.rank_groups.quad()?;
        let mut tiebreaks = vec![quad];
        tiebreaks.extend(analysis.rank_groups.kickers(&[quad], 1));
        Some(analysis.score(Category::FourOfAKind, &tiebreaks))
    }
}

pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandScore> {
        let (trips, pair) = analysis.rank_groups.full_house()?;
        Some(analysis.score(Category::FullHouse, &[trips, pair]))
    }
}

pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandScore> {
        let suit = analysis.suit_info.flush_suits().next()?;
        Some(analysis.score(Category::Flush, &analysis.suit_info.top_five(suit)))
    }
}

pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandScore> {
        let high = analysis.straight_high()?;
        Some(analysis.score(Category::Straight, &[high]))
    }
}

pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandScore> {
        let trips = analysis.rank_groups.trips()?;
        let mut tiebreaks = vec![trips];
        tiebreaks.extend(analysis.rank_groups.kickers(&[trips], 2));
        Some(analysis.score(Category::ThreeOfAKind, &tiebreaks))
    }
}

pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandScore> {
        let pairs = analysis.rank_groups.pairs();
        let (&high, &low) = (pairs.first()?, pairs.get(1)?);
        let mut tiebreaks = vec![high, low];
        tiebreaks.extend(analysis.rank_groups.kickers(&[high, low], 1));
        Some(analysis.score(Category::TwoPair, &tiebreaks))
    }
}

pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandScore> {
        let pair = *analysis.rank_groups.pairs().first()?;
        let mut tiebreaks = vec![pair];
        tiebreaks.extend(analysis.rank_groups.kickers(&[pair], 3));
        Some(analysis.score(Category::Pair, &tiebreaks))
    }
}

/// Always matches; the fallback at the end of the list.
pub struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<HandScore> {
        Some(analysis.score(Category::HighCard, &analysis.rank_groups.kickers(&[], 5)))
    }
}

/// Detectors in classification order: first match wins.
pub const DETECTORS: [&dyn CategoryDetector; 10] = [
    &RoyalFlushDetector,
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn analyse(s: &str) -> HandAnalysis {
        HandAnalysis::new(&parse_cards(s).unwrap())
    }

    #[test]
    fn royal_detector_ignores_lower_straight_flush() {
        let a = analyse("Ks Qs Js Ts 9s 2d 3c");
        assert!(RoyalFlushDetector.detect(&a).is_none());
        let sf = StraightFlushDetector.detect(&a).unwrap();
        assert_eq!(sf.category(), Category::StraightFlush);
        assert_eq!(sf.tiebreaks(), &[13]);
    }

    #[test]
    fn quad_kicker_may_come_from_a_pair() {
        let a = analyse("8c 8d 8h 8s Qc Qd 3h");
        let s = FourOfAKindDetector.detect(&a).unwrap();
        assert_eq!(s.tiebreaks(), &[8, 12]);
    }

    #[test]
    fn trips_detector_takes_two_kickers() {
        let a = analyse("5c 5d 5h Ac Td 7s 2h");
        let s = ThreeOfAKindDetector.detect(&a).unwrap();
        assert_eq!(s.tiebreaks(), &[5, 14, 10]);
    }

    #[test]
    fn two_pair_with_three_pairs_uses_third_as_kicker() {
        let a = analyse("Kc Kd 9h 9s 4c 4d 2h");
        let s = TwoPairDetector.detect(&a).unwrap();
        assert_eq!(s.tiebreaks(), &[13, 9, 4]);
    }

    #[test]
    fn one_pair_detector_declines_without_pair() {
        let a = analyse("Ac Kd 9h 7s 4c 3d 2h");
        assert!(OnePairDetector.detect(&a).is_none());
        let s = HighCardDetector.detect(&a).unwrap();
        assert_eq!(s.tiebreaks(), &[14, 13, 9, 7, 4]);
    }
}
