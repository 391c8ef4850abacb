//! Best score per player name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name → best score table. A player's entry never decreases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: BTreeMap<String, u32>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from existing `(name, score)` pairs; duplicate names keep the best.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, u32)>,
    {
        let mut board = Self::new();
        for (name, score) in entries {
            board.submit(&name, score);
        }
        board
    }

    /// Record a finished run.
    ///
    /// Returns true if this became the player's best, which happens when the
    /// player has no entry or strictly beat it.
    pub fn submit(&mut self, name: &str, score: u32) -> bool {
        match self.entries.get_mut(name) {
            Some(best) if score <= *best => false,
            Some(best) => {
                *best = score;
                true
            }
            None => {
                self.entries.insert(name.to_string(), score);
                true
            }
        }
    }

    /// Best score recorded for `name`.
    pub fn best(&self, name: &str) -> Option<u32> {
        self.entries.get(name).copied()
    }

    /// Up to `n` entries, highest score first, ties by name.
    pub fn top(&self, n: usize) -> Vec<(&str, u32)> {
        let mut ranked: Vec<(&str, u32)> = self
            .entries
            .iter()
            .map(|(name, score)| (name.as_str(), *score))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, score)| (name.as_str(), *score))
    }
}
