use holdem_rs::betting::{Action, ActionError};
use holdem_rs::config::TableConfig;
use holdem_rs::error::EngineError;
use holdem_rs::participant::ParticipantId;
use holdem_rs::table::{Street, Table};
use proptest::prelude::*;

fn mk_table(stacks: &[u64]) -> (Table, Vec<ParticipantId>) {
    let mut t = Table::new(TableConfig::default().with_seed(41)).unwrap();
    let ids = stacks.iter().enumerate().map(|(i, &s)| t.seat_with_stack(format!("P{i}"), s)).collect();
    (t, ids)
}

fn call_down(t: &mut Table) {
    while let Some(id) = t.next_to_act() {
        t.submit_action(id, Action::Call).unwrap();
    }
}

fn seat_index(t: &Table, id: ParticipantId) -> usize {
    t.participants().iter().position(|p| p.id() == id).unwrap()
}

#[test]
fn everyone_all_in_runs_the_board_out() {
    let (mut t, _) = mk_table(&[100, 100, 100]);
    t.new_hand().unwrap();
    let first = t.next_to_act().unwrap();
    t.submit_action(first, Action::Raise(100)).unwrap();
    call_down(&mut t);
    assert_eq!(t.pool(), 300);

    for expected in [Street::Flop, Street::Turn, Street::River, Street::Showdown] {
        assert_eq!(t.advance_street().unwrap(), expected);
        assert_eq!(t.next_to_act(), None);
    }
    assert_eq!(t.board().len(), 5);
    assert_eq!(t.cards_remaining(), 52 - 6 - 8);
    let payouts = t.settle().unwrap();
    assert_eq!(payouts.iter().map(|p| p.amount).sum::<u64>(), 300);
}

#[test]
fn lone_actor_owing_nothing_does_not_act() {
    let (mut t, ids) = mk_table(&[40, 40, 500]);
    t.new_hand().unwrap();
    while let Some(id) = t.next_to_act() {
        let short = id != ids[2];
        let action = if short && t.requirement() < 40 { Action::Raise(40) } else { Action::Call };
        t.submit_action(id, action).unwrap();
    }
    assert_eq!(t.pool(), 120);
    assert_eq!(t.advance_street().unwrap(), Street::Flop);
    assert_eq!(t.pending(), 0);
    assert_eq!(t.next_to_act(), None);
}

#[test]
fn short_call_puts_participant_all_in() {
    let (mut t, ids) = mk_table(&[500, 500, 30]);
    t.new_hand().unwrap();
    let mut raised = false;
    while let Some(id) = t.next_to_act() {
        let action = if !raised && id != ids[2] {
            raised = true;
            Action::Raise(100)
        } else {
            Action::Call
        };
        t.submit_action(id, action).unwrap();
    }
    let short = t.participant(ids[2]).unwrap();
    assert!(short.flags().all_in);
    assert_eq!(short.stack(), 0);
    assert_eq!(short.contributed(), 30);
    assert_eq!(t.pool(), 230);
}

#[test]
fn bet_and_raise_follow_the_requirement() {
    let (mut t, _) = mk_table(&[500, 500, 500]);
    t.new_hand().unwrap();
    let first = t.next_to_act().unwrap();
    assert_eq!(
        t.submit_action(first, Action::Bet(20)),
        Err(EngineError::InvalidAction(ActionError::BetNotAllowed { current: 5 }))
    );
    assert_eq!(
        t.submit_action(first, Action::Raise(5)),
        Err(EngineError::InvalidAction(ActionError::AmountTooLow { current: 5, got: 5 }))
    );
    call_down(&mut t);
    t.advance_street().unwrap();
    let actor = t.next_to_act().unwrap();
    assert_eq!(
        t.submit_action(actor, Action::Raise(20)),
        Err(EngineError::InvalidAction(ActionError::RaiseNotAllowed))
    );
    t.submit_action(actor, Action::Bet(20)).unwrap();
    assert_eq!(t.requirement(), 20);
    assert_eq!(t.pending(), 2);
}

#[test]
fn postflop_action_starts_at_small_blind_skipping_folded() {
    let (mut t, _) = mk_table(&[500, 500, 500, 500]);
    t.new_hand().unwrap();
    let sb = t.participants().iter().position(|p| p.flags().small_blind).unwrap();
    let bb = t.participants().iter().position(|p| p.flags().big_blind).unwrap();
    while let Some(id) = t.next_to_act() {
        let action = if seat_index(&t, id) == sb { Action::Fold } else { Action::Call };
        t.submit_action(id, action).unwrap();
    }
    t.advance_street().unwrap();
    let first = t.next_to_act().unwrap();
    assert_eq!(seat_index(&t, first), bb);
}

#[test]
fn raise_gives_every_other_participant_a_turn() {
    let (mut t, _) = mk_table(&[500, 500, 500, 500]);
    t.new_hand().unwrap();
    call_down(&mut t);
    t.advance_street().unwrap();

    let mut acted = Vec::new();
    let opener = t.next_to_act().unwrap();
    t.submit_action(opener, Action::Check).unwrap();
    let bettor = t.next_to_act().unwrap();
    t.submit_action(bettor, Action::Bet(30)).unwrap();
    while let Some(id) = t.next_to_act() {
        acted.push(id);
        t.submit_action(id, Action::Call).unwrap();
    }
    assert_eq!(acted.len(), 3);
    assert!(acted.contains(&opener));
    assert!(!acted.contains(&bettor));
    assert_eq!(t.pool(), 20 + 120);
}

#[test]
fn actions_after_the_hand_are_rejected() {
    let (mut t, _) = mk_table(&[500, 500, 500]);
    t.new_hand().unwrap();
    let mut last = None;
    while let Some(id) = t.next_to_act() {
        last = Some(id);
        t.submit_action(id, Action::Fold).unwrap();
    }
    let id = last.unwrap();
    assert_eq!(
        t.submit_action(id, Action::Call),
        Err(EngineError::InvalidAction(ActionError::HandOver))
    );
    assert_eq!(t.advance_street(), Ok(Street::FoldWin));
    t.settle().unwrap();
    assert_eq!(t.settle(), Err(EngineError::NoHandInProgress));
}

fn pick(choice: Option<(u8, u64)>, requirement: u64) -> Action {
    match choice {
        Some((0, _)) => Action::Fold,
        Some((1, _)) => Action::Check,
        Some((2, _)) | None => Action::Call,
        Some((3, amount)) => Action::Bet(amount),
        Some((_, extra)) => Action::Raise(requirement + extra),
    }
}

proptest! {
    #[test]
    fn random_betting_conserves_chips(
        stacks in prop::collection::vec(1u64..600, 3..7),
        moves in prop::collection::vec((0u8..5, 1u64..700), 0..60),
        seed in any::<u64>(),
    ) {
        let mut t = Table::new(TableConfig::default().with_seed(seed)).unwrap();
        for (i, &stack) in stacks.iter().enumerate() {
            t.seat_with_stack(format!("P{i}"), stack);
        }
        let total: u64 = stacks.iter().sum();
        t.new_hand().unwrap();

        let mut moves = moves.into_iter();
        let mut steps = 0;
        loop {
            while let Some(id) = t.next_to_act() {
                steps += 1;
                prop_assert!(steps < 500, "betting never closed");
                let able = t.participants().iter().filter(|p| p.can_act()).count();
                prop_assert!(t.pending() <= able);
                let action = pick(moves.next(), t.requirement());
                if t.submit_action(id, action).is_err() {
                    t.submit_action(id, Action::Call).unwrap();
                }
            }
            let in_play: u64 =
                t.participants().iter().map(|p| p.stack() + p.bet()).sum::<u64>() + t.pool();
            prop_assert_eq!(in_play, total);
            if t.street().is_terminal() {
                break;
            }
            prop_assert_eq!(t.pending(), 0);
            t.advance_street().unwrap();
        }

        let contributed: u64 = t.participants().iter().map(|p| p.contributed()).sum();
        prop_assert_eq!(t.pool(), contributed);
        let pool = t.pool();
        let payouts = t.settle().unwrap();
        prop_assert_eq!(payouts.iter().map(|p| p.amount).sum::<u64>(), pool);
        prop_assert_eq!(t.participants().iter().map(|p| p.stack()).sum::<u64>(), total);
    }
}
