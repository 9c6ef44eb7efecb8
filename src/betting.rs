//! Betting actions and their legality against the current requirement.
//!
//! The table owns turn order and the pending countdown; this module only
//! decides what an action means for one participant's bet and stack.

use crate::participant::ParticipantId;
use std::fmt;
use std::str::FromStr;

/// A participant's decision on their turn. `Bet` and `Raise` carry the new
/// street total the participant wants to stand at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet(u64),
    Raise(u64),
}

impl Action {
    /// Parse free text, treating anything unrecognised as a fold.
    ///
    /// ```
    /// use holdem_rs::betting::Action;
    ///
    /// assert_eq!(Action::parse_or_fold("raise 40"), Action::Raise(40));
    /// assert_eq!(Action::parse_or_fold("dance"), Action::Fold);
    /// ```
    pub fn parse_or_fold(input: &str) -> Action {
        input.parse().unwrap_or(Action::Fold)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => f.write_str("fold"),
            Action::Check => f.write_str("check"),
            Action::Call => f.write_str("call"),
            Action::Bet(n) => write!(f, "bet {n}"),
            Action::Raise(n) => write!(f, "raise {n}"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionParseError {
    #[error("empty action")]
    Empty,
    #[error("unknown action: {0}")]
    Unknown(String),
    #[error("missing amount for {0}")]
    MissingAmount(&'static str),
    #[error("invalid amount: {0}")]
    BadAmount(String),
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().ok_or(ActionParseError::Empty)?.to_ascii_lowercase();
        let amount = |name: &'static str, word: Option<&str>| -> Result<u64, ActionParseError> {
            let w = word.ok_or(ActionParseError::MissingAmount(name))?;
            w.parse().map_err(|_| ActionParseError::BadAmount(w.to_string()))
        };
        match verb.as_str() {
            "fold" | "f" => Ok(Action::Fold),
            "check" | "x" => Ok(Action::Check),
            "call" | "c" => Ok(Action::Call),
            "bet" | "b" => Ok(Action::Bet(amount("bet", words.next())?)),
            "raise" | "r" => Ok(Action::Raise(amount("raise", words.next())?)),
            _ => Err(ActionParseError::Unknown(verb)),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("the hand is over")]
    HandOver,
    #[error("betting on this street is closed")]
    StreetClosed,
    #[error("not your turn: expected {expected}, got {got}")]
    NotYourTurn { expected: ParticipantId, got: ParticipantId },
    #[error("unknown participant {0}")]
    UnknownParticipant(ParticipantId),
    #[error("participant cannot act")]
    CannotAct,
    #[error("cannot check facing {to_call} to call")]
    CheckNotAllowed { to_call: u64 },
    #[error("cannot bet into an existing requirement of {current}; raise instead")]
    BetNotAllowed { current: u64 },
    #[error("nothing to raise; bet instead")]
    RaiseNotAllowed,
    #[error("amount must exceed the current requirement: current {current}, got {got}")]
    AmountTooLow { current: u64, got: u64 },
}

/// The effect of a legal action on one participant's street bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolution {
    Fold,
    Check,
    /// Match the requirement, or as much of it as the stack allows.
    Call { to: u64, all_in: bool },
    /// Put in chips beyond the requirement; `to` is capped by the stack.
    Raise { to: u64, all_in: bool },
}

/// Validate `action` for a participant who has `bet` in front of them and
/// `stack` behind, facing `requirement`.
pub(crate) fn resolve(
    action: Action,
    bet: u64,
    stack: u64,
    requirement: u64,
) -> Result<Resolution, ActionError> {
    let available = bet + stack;
    match action {
        Action::Fold => Ok(Resolution::Fold),
        Action::Check => {
            if bet >= requirement {
                Ok(Resolution::Check)
            } else {
                Err(ActionError::CheckNotAllowed { to_call: requirement - bet })
            }
        }
        Action::Call if bet >= requirement => Ok(Resolution::Check),
        Action::Call if available <= requirement => {
            Ok(Resolution::Call { to: available, all_in: true })
        }
        Action::Call => Ok(Resolution::Call { to: requirement, all_in: false }),
        Action::Bet(_) if requirement > 0 => Err(ActionError::BetNotAllowed { current: requirement }),
        Action::Raise(_) if requirement == 0 => Err(ActionError::RaiseNotAllowed),
        Action::Bet(amount) | Action::Raise(amount) => {
            if amount <= requirement {
                return Err(ActionError::AmountTooLow { current: requirement, got: amount });
            }
            if available <= amount {
                Ok(Resolution::Raise { to: available, all_in: true })
            } else {
                Ok(Resolution::Raise { to: amount, all_in: false })
            }
        }
    }
}
