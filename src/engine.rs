// Read-only view of a table for agents. Decision logic sees what a seated
// player could see and never mutates the table; the session submits the
// returned action on the agent's behalf.

use crate::betting::Action;
use crate::hand::{Board, HoleCards};
use crate::participant::{Participant, ParticipantId};
use crate::table::{Street, Table};

pub trait TableView {
    // Hand state
    fn street(&self) -> Street;
    fn board(&self) -> &Board;
    fn pool(&self) -> u64;
    fn requirement(&self) -> u64;
    fn big_blind(&self) -> u64;
    fn next_to_act(&self) -> Option<ParticipantId>;

    // Participants
    fn participants(&self) -> &[Participant];
    fn to_call(&self, id: ParticipantId) -> u64;
    fn stack(&self, id: ParticipantId) -> u64;
    fn bet(&self, id: ParticipantId) -> u64;
    fn hole_cards(&self, id: ParticipantId) -> Option<HoleCards>;

    /// Chips currently on the table: the pool plus open street bets.
    fn pot(&self) -> u64 {
        self.pool() + self.participants().iter().map(|p| p.bet()).sum::<u64>()
    }

    /// Participants still contesting the hand.
    fn contestants(&self) -> usize {
        self.participants().iter().filter(|p| p.is_contesting()).count()
    }

    /// The cheapest action that keeps `id` in the hand.
    fn passive_action(&self, id: ParticipantId) -> Action {
        if self.to_call(id) == 0 {
            Action::Check
        } else {
            Action::Call
        }
    }
}

impl TableView for Table {
    fn street(&self) -> Street {
        self.street
    }
    fn board(&self) -> &Board {
        &self.board
    }
    fn pool(&self) -> u64 {
        self.pool
    }
    fn requirement(&self) -> u64 {
        self.requirement
    }
    fn big_blind(&self) -> u64 {
        self.config.big_blind
    }
    fn next_to_act(&self) -> Option<ParticipantId> {
        Table::next_to_act(self)
    }

    fn participants(&self) -> &[Participant] {
        &self.participants
    }
    fn to_call(&self, id: ParticipantId) -> u64 {
        Table::to_call(self, id)
    }
    fn stack(&self, id: ParticipantId) -> u64 {
        self.participant(id).map_or(0, |p| p.stack())
    }
    fn bet(&self, id: ParticipantId) -> u64 {
        self.participant(id).map_or(0, |p| p.bet())
    }
    fn hole_cards(&self, id: ParticipantId) -> Option<HoleCards> {
        self.participant(id).and_then(|p| p.hole())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;

    #[test]
    fn view_reports_open_bets_in_pot() {
        let mut t = Table::new(TableConfig::default().with_seed(3)).unwrap();
        let ids: Vec<_> = ["a", "b", "c"].iter().map(|n| t.seat(*n)).collect();
        t.new_hand().unwrap();
        let view: &dyn TableView = &t;
        assert_eq!(view.pool(), 0);
        assert_eq!(view.pot(), 7);
        assert_eq!(view.contestants(), 3);
        let first = view.next_to_act().unwrap();
        assert!(ids.contains(&first));
        assert_eq!(view.passive_action(first), Action::Call);
        assert!(view.hole_cards(first).is_some());
    }
}
