use holdem_rs::betting::Action;
use holdem_rs::config::TableConfig;
use holdem_rs::participant::ParticipantId;
use holdem_rs::table::Table;

fn mk_table(stacks: &[u64]) -> (Table, Vec<ParticipantId>) {
    let mut t = Table::new(TableConfig::default().with_seed(3)).unwrap();
    let ids = stacks.iter().enumerate().map(|(i, &s)| t.seat_with_stack(format!("P{i}"), s)).collect();
    (t, ids)
}

fn fold_out(t: &mut Table) {
    while let Some(id) = t.next_to_act() {
        t.submit_action(id, Action::Fold).unwrap();
    }
    t.settle().unwrap();
}

fn index_where(t: &Table, f: impl Fn(&holdem_rs::participant::Participant) -> bool) -> usize {
    t.participants().iter().position(f).unwrap()
}

#[test]
fn button_and_blinds_move_one_seat_per_hand() {
    let (mut t, _) = mk_table(&[500, 500, 500, 500]);
    t.new_hand().unwrap();
    let mut dealer = index_where(&t, |p| p.flags().dealer);
    fold_out(&mut t);
    for _ in 0..6 {
        t.new_hand().unwrap();
        let next = index_where(&t, |p| p.flags().dealer);
        assert_eq!(next, (dealer + 1) % 4);
        assert_eq!(index_where(&t, |p| p.flags().small_blind), (next + 1) % 4);
        assert_eq!(index_where(&t, |p| p.flags().big_blind), (next + 2) % 4);
        dealer = next;
        fold_out(&mut t);
    }
}

#[test]
fn broke_participants_are_skipped_for_positions_and_cards() {
    let (mut t, ids) = mk_table(&[500, 0, 500, 500]);
    for _ in 0..5 {
        t.new_hand().unwrap();
        let broke = t.participant(ids[1]).unwrap();
        assert!(broke.flags().eliminated);
        assert!(!broke.flags().dealer && !broke.flags().small_blind && !broke.flags().big_blind);
        assert!(broke.hole().is_none());
        assert_ne!(t.next_to_act(), Some(ids[1]));
        fold_out(&mut t);
    }
}

#[test]
fn deal_starts_at_small_blind() {
    let (mut t, _) = mk_table(&[500, 500, 500]);
    t.new_hand().unwrap();
    let sb = index_where(&t, |p| p.flags().small_blind);
    let dealt = t.participants().iter().filter(|p| p.hole().is_some()).count();
    assert_eq!(dealt, 3);
    assert!(t.participants()[sb].hole().is_some());
    assert_eq!(t.cards_remaining(), 46);
}
