//! Agents: pluggable decision makers for seated participants.
//!
//! `PlayerAgent` is the seam between the table and whatever chooses actions
//! (scripted sequences in tests, bots in the binary). Agents only see a
//! `TableView`; the session applies their decisions and falls back to a fold
//! when a decision is rejected.

use crate::betting::Action;
use crate::engine::TableView;
use crate::participant::ParticipantId;
use core::fmt;
use std::collections::{BTreeMap, VecDeque};

/// Kinds of agents attached to participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Scripted,
    Passive,
    Bot,
}

/// Chooses actions for one participant.
pub trait PlayerAgent {
    /// Called when `id` is next to act.
    fn decide(&mut self, view: &dyn TableView, id: ParticipantId) -> Action;

    /// Called when `id` has run out of chips between hands.
    fn wants_rebuy(&mut self, _view: &dyn TableView, _id: ParticipantId) -> bool {
        true
    }

    fn kind(&self) -> AgentKind;
}

mod bots;

pub use bots::{BotAgent, BotProfile, Difficulty};

/// Plays a fixed list of actions, then checks or calls.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAgent {
    script: VecDeque<Action>,
    rebuy: bool,
}

impl ScriptedAgent {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self { script: actions.into_iter().collect(), rebuy: false }
    }

    /// Build a script from text, one action per entry; unreadable text folds.
    pub fn from_text<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(lines.into_iter().map(Action::parse_or_fold))
    }

    pub fn with_rebuy(mut self, rebuy: bool) -> Self {
        self.rebuy = rebuy;
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl PlayerAgent for ScriptedAgent {
    fn decide(&mut self, view: &dyn TableView, id: ParticipantId) -> Action {
        self.script.pop_front().unwrap_or_else(|| view.passive_action(id))
    }

    fn wants_rebuy(&mut self, _view: &dyn TableView, _id: ParticipantId) -> bool {
        self.rebuy
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Scripted
    }
}

/// Never folds, never raises.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallingStation;

impl PlayerAgent for CallingStation {
    fn decide(&mut self, view: &dyn TableView, id: ParticipantId) -> Action {
        view.passive_action(id)
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Passive
    }
}

/// Maps participants to the agents that act for them.
#[derive(Default)]
pub struct AgentTable {
    agents: BTreeMap<ParticipantId, Box<dyn PlayerAgent>>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seats: Vec<String> =
            self.agents.iter().map(|(id, a)| format!("{id}:{:?}", a.kind())).collect();
        write!(f, "AgentTable({})", seats.join(" "))
    }
}

impl AgentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign an agent to a participant, replacing any previous one.
    pub fn set_agent(&mut self, id: ParticipantId, agent: Box<dyn PlayerAgent>) {
        self.agents.insert(id, agent);
    }

    pub fn remove(&mut self, id: ParticipantId) -> Option<Box<dyn PlayerAgent>> {
        self.agents.remove(&id)
    }

    pub fn has_agent(&self, id: ParticipantId) -> bool {
        self.agents.contains_key(&id)
    }

    pub fn agent_kind(&self, id: ParticipantId) -> Option<AgentKind> {
        self.agents.get(&id).map(|a| a.kind())
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Ask the agent for `id`; `None` when nobody controls that participant.
    pub fn decide(&mut self, view: &dyn TableView, id: ParticipantId) -> Option<Action> {
        self.agents.get_mut(&id).map(|a| a.decide(view, id))
    }

    /// Participants without an agent never rebuy.
    pub fn wants_rebuy(&mut self, view: &dyn TableView, id: ParticipantId) -> bool {
        self.agents.get_mut(&id).is_some_and(|a| a.wants_rebuy(view, id))
    }
}
