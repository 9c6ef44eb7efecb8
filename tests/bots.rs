use holdem_rs::agents::{AgentTable, BotAgent, BotProfile, Difficulty, PlayerAgent};
use holdem_rs::betting::Action;
use holdem_rs::config::TableConfig;
use holdem_rs::session::{EndReason, Session};
use holdem_rs::table::Table;

fn bot_session(n: u64, hands: u64, rebuy: bool, seed: u64) -> Session {
    let cfg = TableConfig::default().with_seed(seed).with_max_hands(hands);
    let mut table = Table::new(cfg).unwrap();
    let mut agents = AgentTable::new();
    for i in 0..n {
        let id = table.seat(format!("Bot {i}"));
        let profile =
            BotProfile::for_difficulty(Difficulty::Hard).with_seed(seed + i).with_rebuy(rebuy);
        agents.set_agent(id, Box::new(BotAgent::new(profile)));
    }
    Session::new(table, agents)
}

#[test]
fn bot_acts_for_the_participant_to_move() {
    let mut s = bot_session(3, 1, true, 4);
    let hand = s.play_hand().unwrap();
    let paid: u64 = hand.payouts.iter().map(|p| p.amount).sum();
    assert!(paid >= 7, "blinds at least");
    assert!(!s.table().in_hand());
}

#[test]
fn bots_without_rebuys_conserve_chips() {
    let mut s = bot_session(5, 60, false, 12);
    let summary = s.run().unwrap();
    assert!(summary.hands_played <= 60);
    let total: u64 = summary.standings.iter().map(|(_, stack)| stack).sum();
    assert_eq!(total, 2500);
    if summary.reason == EndReason::HandLimit {
        assert_eq!(summary.hands_played, 60);
    }
}

#[test]
fn bot_checks_once_the_hand_is_over() {
    let mut s = bot_session(3, 1, true, 9);
    s.play_hand().unwrap();
    let id = s.table().participants()[0].id();
    let mut bot = BotAgent::new(BotProfile::default().with_seed(1));
    assert!(s.table().street().is_terminal());
    assert_eq!(bot.decide(s.table(), id), Action::Check);
}

#[test]
fn six_bot_session_survives_multiway_folds() {
    for seed in [3, 17, 40] {
        let mut s = bot_session(6, 40, true, seed);
        let summary = s.run().unwrap();
        assert!(summary.hands_played > 0);
        assert!(!s.table().in_hand());
    }
}
