//! Drives a table through complete hands with agents choosing the actions.

use crate::agents::AgentTable;
use crate::betting::Action;
use crate::error::EngineError;
use crate::hand::Board;
use crate::participant::ParticipantId;
use crate::table::{Payout, Table};
use tracing::{info, warn};

/// Outcome of one hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandSummary {
    pub hand_number: u64,
    pub board: Board,
    pub payouts: Vec<Payout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EndReason {
    HandLimit,
    InsufficientRoster,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub hands_played: u64,
    pub reason: EndReason,
    /// Name and final stack of every participant still seated.
    pub standings: Vec<(String, u64)>,
}

#[derive(Debug)]
pub struct Session {
    table: Table,
    agents: AgentTable,
}

impl Session {
    pub fn new(table: Table, agents: AgentTable) -> Self {
        Self { table, agents }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn agents_mut(&mut self) -> &mut AgentTable {
        &mut self.agents
    }

    /// Offer every busted participant a rebuy; those who decline leave.
    fn resolve_busted(&mut self) -> Result<(), EngineError> {
        for id in self.table.busted() {
            if self.agents.wants_rebuy(&self.table, id) {
                self.table.rebuy(id)?;
            } else {
                self.table.retire(id)?;
                self.agents.remove(id);
            }
        }
        Ok(())
    }

    fn act(&mut self, id: ParticipantId) -> Result<(), EngineError> {
        let action = match self.agents.decide(&self.table, id) {
            Some(a) => a,
            None => {
                warn!(participant = %id, "no agent seated; folding");
                Action::Fold
            }
        };
        match self.table.submit_action(id, action) {
            Err(EngineError::InvalidAction(err)) => {
                warn!(participant = %id, %action, error = %err, "falling back to fold");
                self.table.submit_action(id, Action::Fold)
            }
            other => other,
        }
    }

    /// Play one hand from the blinds to settlement.
    pub fn play_hand(&mut self) -> Result<HandSummary, EngineError> {
        self.resolve_busted()?;
        self.table.new_hand()?;
        loop {
            while let Some(id) = self.table.next_to_act() {
                self.act(id)?;
            }
            if self.table.street().is_terminal() {
                break;
            }
            self.table.advance_street()?;
        }
        let board = self.table.board().clone();
        let payouts = self.table.settle()?;
        Ok(HandSummary { hand_number: self.table.hand_number(), board, payouts })
    }

    /// Play until the hand limit or until too few players remain.
    pub fn run(&mut self) -> Result<SessionSummary, EngineError> {
        let limit = self.table.config().max_hands;
        let mut hands_played = 0;
        let reason = loop {
            if hands_played >= limit {
                break EndReason::HandLimit;
            }
            match self.play_hand() {
                Ok(summary) => {
                    hands_played += 1;
                    info!(hand = summary.hand_number, payouts = summary.payouts.len(), "hand complete");
                }
                Err(EngineError::InsufficientRoster { remaining, required }) => {
                    info!(remaining, required, "not enough players, ending session");
                    break EndReason::InsufficientRoster;
                }
                Err(e) => return Err(e),
            }
        };
        let standings =
            self.table.participants().iter().map(|p| (p.name().to_string(), p.stack())).collect();
        info!(hands_played, ?reason, "session over");
        Ok(SessionSummary { hands_played, reason, standings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{CallingStation, ScriptedAgent};
    use crate::config::TableConfig;

    fn mk_session(n: usize, max_hands: u64) -> Session {
        let cfg = TableConfig::default().with_seed(17).with_max_hands(max_hands);
        let mut table = Table::new(cfg).unwrap();
        let mut agents = AgentTable::new();
        for i in 0..n {
            let id = table.seat(format!("P{i}"));
            agents.set_agent(id, Box::new(CallingStation));
        }
        Session::new(table, agents)
    }

    #[test]
    fn calling_stations_reach_showdown_and_conserve_chips() {
        let mut s = mk_session(3, 1);
        let summary = s.play_hand().unwrap();
        assert_eq!(summary.board.len(), 5);
        let paid: u64 = summary.payouts.iter().map(|p| p.amount).sum();
        assert_eq!(paid, 15);
        let total: u64 = s.table().participants().iter().map(|p| p.stack()).sum();
        assert_eq!(total, 1500);
    }

    #[test]
    fn run_stops_at_hand_limit() {
        let mut s = mk_session(3, 4);
        let summary = s.run().unwrap();
        assert_eq!(summary.hands_played, 4);
        assert_eq!(summary.reason, EndReason::HandLimit);
        assert_eq!(summary.standings.iter().map(|(_, s)| s).sum::<u64>(), 1500);
    }

    #[test]
    fn rejected_action_becomes_a_fold() {
        let mut s = mk_session(3, 1);
        s.table.new_hand().unwrap();
        let id = s.table.next_to_act().unwrap();
        s.agents_mut().set_agent(id, Box::new(ScriptedAgent::new([Action::Check])));
        s.act(id).unwrap();
        assert!(s.table().participant(id).unwrap().flags().folded);
    }
}
