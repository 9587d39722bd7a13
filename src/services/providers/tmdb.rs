/// TMDB API provider
///
/// Single source for movie search, credit rolls, and person filmographies
/// (TMDB v3 REST). The bearer credential is resolved per call: a token from
/// the environment wins, otherwise the one saved through the settings
/// surface. Every request waits on the shared pacer first, and nothing is
/// retried — an upstream failure is the caller's problem.
use std::sync::Arc;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::tmdb::{
        TmdbCreditsResponse, TmdbMovieDetails, TmdbPersonCreditsResponse, TmdbSearchResponse,
    },
    models::{MovieCredits, MovieRef, PersonCredits},
    services::providers::MetadataProvider,
    services::throttle::RequestPacer,
};

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_url: String,
    config_token: Option<String>,
    cache: Cache,
    pacer: Arc<RequestPacer>,
}

impl TmdbProvider {
    pub fn new(
        cache: Cache,
        pacer: Arc<RequestPacer>,
        api_url: String,
        config_token: Option<String>,
    ) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
            config_token,
            cache,
            pacer,
        }
    }

    /// Resolves the bearer credential for one call: environment token first,
    /// then the settings-store token.
    async fn resolve_token(&self) -> AppResult<String> {
        if let Some(token) = self.config_token.as_deref() {
            if !token.is_empty() {
                return Ok(token.to_string());
            }
        }

        let saved: Option<String> = self.cache.get_from_cache(&CacheKey::Credential).await?;
        match saved {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(AppError::AuthMissing),
        }
    }

    /// Issues one GET against the TMDB API, pacing it behind the shared
    /// throttle. A non-success status is fatal to the call.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let token = self.resolve_token().await?;

        self.pacer.wait().await;

        let url = format!("{}{}", self.api_url, path);
        tracing::debug!(url = %url, "TMDB request");

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(url = %url, status = status, "TMDB request failed");
            return Err(AppError::Upstream { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn search_movie(&self, title: &str, year: i32) -> AppResult<Vec<MovieRef>> {
        if title.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search title cannot be empty".to_string(),
            ));
        }

        let query = [
            ("query", title.to_string()),
            ("primary_release_year", year.to_string()),
        ];
        let response: TmdbSearchResponse = self.get_json("/search/movie", &query).await?;

        let movies: Vec<MovieRef> = response.results.into_iter().map(MovieRef::from).collect();

        tracing::info!(
            title = %title,
            year = year,
            results = movies.len(),
            "Movie search completed"
        );

        Ok(movies)
    }

    async fn movie_details(&self, movie_id: u64) -> AppResult<MovieRef> {
        let details: TmdbMovieDetails = self
            .get_json(&format!("/movie/{}", movie_id), &[])
            .await?;
        Ok(details.into())
    }

    async fn movie_credits(&self, movie_id: u64) -> AppResult<MovieCredits> {
        let response: TmdbCreditsResponse = self
            .get_json(&format!("/movie/{}/credits", movie_id), &[])
            .await?;

        let credits = MovieCredits::from(response);
        tracing::debug!(
            movie_id = movie_id,
            cast = credits.cast.len(),
            crew = credits.crew.len(),
            "Credits fetched"
        );

        Ok(credits)
    }

    async fn person_movie_credits(&self, person_id: u64) -> AppResult<PersonCredits> {
        let response: TmdbPersonCreditsResponse = self
            .get_json(&format!("/person/{}/movie_credits", person_id), &[])
            .await?;

        let credits = PersonCredits::from(response);
        tracing::debug!(
            person_id = person_id,
            performer = credits.performer.len(),
            crew = credits.crew.len(),
            "Person credits fetched"
        );

        Ok(credits)
    }
}
