//! Combat log: bounded, newest-first record of what happened
//!
//! Purely observational; the simulation never reads it back.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::consts::LOG_CAPACITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Hit,
    Miss,
    Kill,
    Damage,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub kind: LogKind,
    pub message: String,
    /// Session time (seconds)
    pub at: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatLog {
    entries: VecDeque<LogEntry>,
    next_id: u64,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: LogKind, message: impl Into<String>, at: f32) {
        self.next_id += 1;
        self.entries.push_front(LogEntry {
            id: self.next_id,
            kind,
            message: message.into(),
            at,
        });
        self.entries.truncate(LOG_CAPACITY);
    }

    /// Newest first
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
