//! Pot settlement with side-pot caps.
//!
//! Each contesting participant can win at most its cap: the sum over every
//! participant of `min(own contribution, their contribution)`. Winners are
//! paid tier by tier from the best hand down; tied winners share a tier in
//! layers, smallest cap first. Whatever no contestant can claim goes back to
//! the participants who put in more than the largest contesting commitment.

use crate::evaluator::HandScore;

/// One participant's stake in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stake {
    /// Chips put in this hand.
    pub contributed: u64,
    /// Not folded and still holding cards.
    pub contesting: bool,
    /// Showdown score; `None` when the hand was won uncontested.
    pub score: Option<HandScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AwardKind {
    Win,
    Split,
    Refund,
}

/// Chips paid to the stake at index `seat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Award {
    pub seat: usize,
    pub amount: u64,
    pub kind: AwardKind,
}

/// Cap of every stake; zero for participants no longer contesting.
pub fn caps(stakes: &[Stake]) -> Vec<u64> {
    stakes
        .iter()
        .map(|p| {
            if !p.contesting {
                return 0;
            }
            stakes.iter().map(|q| p.contributed.min(q.contributed)).sum()
        })
        .collect()
}

/// Distribute `pool` among `stakes`.
///
/// Works for both outcomes: a single contesting stake (everyone else folded)
/// simply takes its cap. Awards are listed in payout order and always sum to
/// `pool` as long as the pool is non-empty and someone contributed.
pub fn distribute(stakes: &[Stake], pool: u64) -> Vec<Award> {
    let mut caps = caps(stakes);
    let mut remaining = pool;
    let mut awards = Vec::new();

    let mut order: Vec<usize> = (0..stakes.len()).filter(|&i| stakes[i].contesting).collect();
    // Best hand first; equal hands keep ascending seat order.
    order.sort_by(|&a, &b| stakes[b].score.cmp(&stakes[a].score).then(a.cmp(&b)));

    let mut tiers = order.chunk_by(|&a, &b| stakes[a].score == stakes[b].score);
    while remaining > 0 {
        let Some(tier) = tiers.next() else { break };
        let mut tied: Vec<usize> = tier.iter().copied().filter(|&i| caps[i] > 0).collect();
        while !tied.is_empty() && remaining > 0 {
            let layer = tied.iter().map(|&i| caps[i]).min().unwrap_or(0).min(remaining);
            let kind = if tied.len() > 1 { AwardKind::Split } else { AwardKind::Win };
            let count = tied.len() as u64;
            let (share, odd) = (layer / count, layer % count);
            for (k, &seat) in tied.iter().enumerate() {
                let amount = share + u64::from((k as u64) < odd);
                if amount > 0 {
                    awards.push(Award { seat, amount, kind });
                }
            }
            remaining -= layer;
            for c in caps.iter_mut() {
                *c = c.saturating_sub(layer);
            }
            tied.retain(|&i| caps[i] > 0);
        }
    }

    if remaining > 0 {
        awards.extend(refunds(stakes, remaining));
    }
    awards
}

/// Return `leftover` to whoever put in more than the largest contesting
/// commitment, pro-rata by that excess.
fn refunds(stakes: &[Stake], leftover: u64) -> Vec<Award> {
    let level = stakes.iter().filter(|s| s.contesting).map(|s| s.contributed).max().unwrap_or(0);
    let mut weights: Vec<u64> = stakes.iter().map(|s| s.contributed.saturating_sub(level)).collect();
    if weights.iter().all(|&w| w == 0) {
        weights = stakes.iter().map(|s| s.contributed).collect();
    }
    pro_rata(leftover, &weights)
        .into_iter()
        .enumerate()
        .filter(|&(_, amount)| amount > 0)
        .map(|(seat, amount)| Award { seat, amount, kind: AwardKind::Refund })
        .collect()
}

/// Split `amount` proportionally to `weights`; rounding remainders go one
/// chip at a time to weighted seats in ascending order.
fn pro_rata(amount: u64, weights: &[u64]) -> Vec<u64> {
    let total: u128 = weights.iter().map(|&w| w as u128).sum();
    if total == 0 {
        return vec![0; weights.len()];
    }
    let mut shares: Vec<u64> =
        weights.iter().map(|&w| (amount as u128 * w as u128 / total) as u64).collect();
    let mut rest = amount - shares.iter().sum::<u64>();
    for (share, _) in shares.iter_mut().zip(weights).filter(|(_, &w)| w > 0) {
        if rest == 0 {
            break;
        }
        *share += 1;
        rest -= 1;
    }
    shares
}
