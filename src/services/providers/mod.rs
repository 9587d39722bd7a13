/// Movie metadata provider abstraction
///
/// The builder and engine only ever see these four read operations; the
/// concrete TMDB client (and any future source) stays behind this trait so
/// tests can substitute canned data.
use crate::{
    error::AppResult,
    models::{MovieCredits, MovieRef, PersonCredits},
};

pub mod tmdb;

/// Trait for movie metadata providers
///
/// All four operations are reads. Every implementation must pass each
/// outgoing call through the shared request pacer and must not retry on
/// failure — a transient upstream error surfaces to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Resolve a title and release year to candidate movies.
    ///
    /// Callers take the first result; an empty list means the movie is
    /// unknown to the provider.
    async fn search_movie(&self, title: &str, year: i32) -> AppResult<Vec<MovieRef>>;

    /// Canonical title, year, and genre set for one movie
    async fn movie_details(&self, movie_id: u64) -> AppResult<MovieRef>;

    /// Full cast and crew roll for one movie
    async fn movie_credits(&self, movie_id: u64) -> AppResult<MovieCredits>;

    /// A person's movie credits, split by performer/crew, undated entries
    /// already dropped
    async fn person_movie_credits(&self, person_id: u64) -> AppResult<PersonCredits>;
}
