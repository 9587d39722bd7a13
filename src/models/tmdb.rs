//! Serde mirrors of the TMDB v3 responses this service consumes, plus the
//! conversions into domain shapes. Response fields TMDB marks nullable stay
//! `Option` here; conversions decide what a missing value means.

use serde::Deserialize;

use super::movie::{CastMember, Credit, CrewMember, MovieCredits, MovieRef, PersonCredits};

/// Extracts the four-digit year from a TMDB date like "1995-12-15".
/// Empty strings are common in TMDB data and yield `None`.
pub fn parse_year(date: &Option<String>) -> Option<i32> {
    date.as_deref()
        .and_then(|d| d.get(..4))
        .and_then(|y| y.parse::<i32>().ok())
}

/// GET /search/movie
#[derive(Debug, Deserialize)]
pub struct TmdbSearchResponse {
    pub results: Vec<TmdbMovieResult>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbMovieResult {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub popularity: f64,
}

impl From<TmdbMovieResult> for MovieRef {
    fn from(result: TmdbMovieResult) -> Self {
        let year = parse_year(&result.release_date);
        MovieRef {
            id: result.id,
            title: result.title,
            year,
            genre_ids: result.genre_ids,
            popularity: result.popularity,
        }
    }
}

/// GET /movie/{id}
#[derive(Debug, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub popularity: f64,
}

#[derive(Debug, Deserialize)]
pub struct TmdbGenre {
    pub id: u64,
    #[allow(dead_code)]
    pub name: String,
}

impl From<TmdbMovieDetails> for MovieRef {
    fn from(details: TmdbMovieDetails) -> Self {
        let year = parse_year(&details.release_date);
        MovieRef {
            id: details.id,
            title: details.title,
            year,
            genre_ids: details.genres.into_iter().map(|g| g.id).collect(),
            popularity: details.popularity,
        }
    }
}

/// GET /movie/{id}/credits
#[derive(Debug, Deserialize)]
pub struct TmdbCreditsResponse {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbCastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub popularity: f64,
}

#[derive(Debug, Deserialize)]
pub struct TmdbCrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub popularity: f64,
    pub job: String,
}

impl From<TmdbCreditsResponse> for MovieCredits {
    fn from(response: TmdbCreditsResponse) -> Self {
        MovieCredits {
            cast: response
                .cast
                .into_iter()
                .map(|member| CastMember {
                    id: member.id,
                    name: member.name,
                    popularity: member.popularity,
                })
                .collect(),
            crew: response
                .crew
                .into_iter()
                .map(|member| CrewMember {
                    id: member.id,
                    name: member.name,
                    popularity: member.popularity,
                    job: member.job,
                })
                .collect(),
        }
    }
}

/// GET /person/{id}/movie_credits
#[derive(Debug, Deserialize)]
pub struct TmdbPersonCreditsResponse {
    #[serde(default)]
    pub cast: Vec<TmdbPersonCastCredit>,
    #[serde(default)]
    pub crew: Vec<TmdbPersonCrewCredit>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbPersonCastCredit {
    pub id: u64,
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub popularity: f64,
}

#[derive(Debug, Deserialize)]
pub struct TmdbPersonCrewCredit {
    pub id: u64,
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub popularity: f64,
    pub job: String,
}

impl TmdbPersonCastCredit {
    /// Credits without a known release date are unusable as moves and are
    /// dropped here.
    pub fn into_credit(self) -> Option<Credit> {
        let year = parse_year(&self.release_date)?;
        Some(Credit {
            movie_id: self.id,
            title: self.title?,
            year,
            genre_ids: self.genre_ids,
            popularity: self.popularity,
            role: "Performer".to_string(),
        })
    }
}

impl TmdbPersonCrewCredit {
    pub fn into_credit(self) -> Option<Credit> {
        let year = parse_year(&self.release_date)?;
        Some(Credit {
            movie_id: self.id,
            title: self.title?,
            year,
            genre_ids: self.genre_ids,
            popularity: self.popularity,
            role: self.job,
        })
    }
}

impl From<TmdbPersonCreditsResponse> for PersonCredits {
    fn from(response: TmdbPersonCreditsResponse) -> Self {
        PersonCredits {
            performer: response
                .cast
                .into_iter()
                .filter_map(TmdbPersonCastCredit::into_credit)
                .collect(),
            crew: response
                .crew
                .into_iter()
                .filter_map(TmdbPersonCrewCredit::into_credit)
                .collect(),
        }
    }
}
