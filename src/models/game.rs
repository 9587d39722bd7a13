use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::movie::Credit;

/// User-defined conjunctive filter used to surface training-relevant moves
/// first: every selected genre must be present, and the release decade must
/// match exactly when one is set.
///
/// A filter with zero criteria is inert — it matches nothing, not everything.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PriorityFilter {
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub decade: Option<i32>,
}

impl PriorityFilter {
    pub fn is_empty(&self) -> bool {
        self.genre_ids.is_empty() && self.decade.is_none()
    }

    pub fn matches(&self, credit: &Credit) -> bool {
        if self.is_empty() {
            return false;
        }
        let genres_match = self
            .genre_ids
            .iter()
            .all(|genre| credit.genre_ids.contains(genre));
        let decade_matches = self
            .decade
            .map_or(true, |decade| (credit.year / 10) * 10 == decade);
        genres_match && decade_matches
    }
}

/// Observable game state at one instant, passed into every ranking call.
///
/// `played` and `used_links` carry the board's own strings (composite movie
/// keys and person display names); all matching against them is
/// case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    /// Movies already on the board, starting movie included, as "Title (Year)"
    #[serde(default)]
    pub played: Vec<String>,
    /// Person names already displayed as used connections
    #[serde(default)]
    pub used_links: Vec<String>,
    #[serde(default = "default_user_turn")]
    pub user_turn: bool,
    #[serde(default)]
    pub game_over: bool,
}

fn default_user_turn() -> bool {
    true
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            played: Vec::new(),
            used_links: Vec::new(),
            user_turn: true,
            game_over: false,
        }
    }
}

/// Counts how many times each connection name has already been used,
/// keyed by lowercase display name. Recomputed from the snapshot on every
/// evaluation, never stored.
pub fn link_usage(used_links: &[String]) -> HashMap<String, u32> {
    let mut usage: HashMap<String, u32> = HashMap::new();
    for name in used_links {
        *usage.entry(name.to_lowercase()).or_insert(0) += 1;
    }
    usage
}

/// One candidate next-movie produced by the ranking engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateMove {
    pub movie_id: u64,
    pub title: String,
    pub year: i32,
    /// Board notation key, e.g. "Alien (1979)"
    pub key: String,
    pub via_person_id: u64,
    /// Display name of the connecting person
    pub via_person: String,
    /// The connecting person's total credit count — more credits means more
    /// future escape routes, regardless of how famous this one film is
    pub score: usize,
    pub is_priority: bool,
    /// Clears the popularity floor enforced during the first three turns
    pub well_known: bool,
}
