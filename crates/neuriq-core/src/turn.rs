//! Conversation turns and the bounded turn log.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    User,
    Model,
}

/// A single turn in a triage conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
    pub timestamp: Timestamp,
    /// Quick-reply options attached to a model turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Turn {
            role: TurnRole::User,
            text: text.into(),
            timestamp: Timestamp::now(),
            options: None,
        }
    }

    pub fn model(text: impl Into<String>, options: Option<Vec<String>>) -> Self {
        Turn {
            role: TurnRole::Model,
            text: text.into(),
            timestamp: Timestamp::now(),
            options,
        }
    }
}

/// Default window kept by a [`TurnLog`].
pub const DEFAULT_TURN_CAP: usize = 40;

/// Bounded conversation log.
///
/// Holds the most recent turns up to a fixed window. Older turns are
/// dropped outright, never summarized, so a very long session loses its
/// earliest context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnLog {
    turns: Vec<Turn>,
    cap: usize,
}

impl TurnLog {
    pub fn new(cap: usize) -> Self {
        TurnLog {
            turns: Vec::new(),
            cap: cap.max(1),
        }
    }

    /// Append a turn, evicting the oldest once the window is full.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
        if self.turns.len() > self.cap {
            let excess = self.turns.len() - self.cap;
            self.turns.drain(..excess);
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }
}

impl Default for TurnLog {
    fn default() -> Self {
        TurnLog::new(DEFAULT_TURN_CAP)
    }
}
