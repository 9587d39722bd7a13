use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Builds the local composite key a movie is known by on the game board.
pub fn movie_key(title: &str, year: i32) -> String {
    format!("{} ({})", title, year)
}

/// How a person is credited on the current movie
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Performer,
    Crew,
    Both,
}

/// A cast or crew member attached to a movie bundle.
///
/// Identity is the provider's person id; a person credited both as performer
/// and crew collapses to a single record with `Role::Both`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: u64,
    pub name: String,
    pub role: Role,
    /// Crew job label, when the person has one (e.g. "Director")
    pub job: Option<String>,
    pub popularity: f64,
}

/// One film inside a person's filmography.
///
/// A film appearing in several filmographies is an independent copy in each,
/// not a shared entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Credit {
    pub movie_id: u64,
    pub title: String,
    pub year: i32,
    pub genre_ids: Vec<u64>,
    pub popularity: f64,
    /// "Performer" or the specific crew job
    pub role: String,
}

impl Credit {
    /// Composite key in board notation, e.g. "Heat (1995)"
    pub fn key(&self) -> String {
        movie_key(&self.title, self.year)
    }
}

/// A person's full movie credit list plus the derived count.
///
/// The count is the engine's principal ranking signal. Immutable once
/// fetched; cached until a manual clear.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Filmography {
    pub credits: Vec<Credit>,
    pub credit_count: usize,
}

impl Filmography {
    pub fn new(credits: Vec<Credit>) -> Self {
        let credit_count = credits.len();
        Self {
            credits,
            credit_count,
        }
    }
}

/// Everything the engine needs to evaluate one playable movie: the movie
/// itself, its relevant people (popularity-sorted, capped), and each
/// person's filmography.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieBundle {
    pub movie_id: u64,
    pub title: String,
    pub year: i32,
    /// Local composite key the bundle was requested under
    pub key: String,
    pub genre_ids: Vec<u64>,
    pub people: Vec<Person>,
    pub filmographies: HashMap<u64, Filmography>,
    /// Set once assembly finished; partial bundles are never served
    pub complete: bool,
    pub fetched_at: DateTime<Utc>,
}

// ============================================================================
// Provider-facing shapes
// ============================================================================

/// A movie as resolved by the metadata provider (search hit or details)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRef {
    pub id: u64,
    pub title: String,
    pub year: Option<i32>,
    pub genre_ids: Vec<u64>,
    pub popularity: f64,
}

/// Performer credited on a movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub popularity: f64,
}

/// Crew member credited on a movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    pub popularity: f64,
    pub job: String,
}

/// Full credit roll for one movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MovieCredits {
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}

/// A person's credits as returned by the provider, split by how they were
/// credited. Entries without a known release date are already dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PersonCredits {
    pub performer: Vec<Credit>,
    pub crew: Vec<Credit>,
}
