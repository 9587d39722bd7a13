use axum::{extract::State, http::StatusCode, Json};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::db::CacheKey;
use crate::error::{AppError, AppResult};
use crate::models::{movie_key, CandidateMove, GameSnapshot, MovieBundle, PriorityFilter};
use crate::services::engine;

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct BundleRequest {
    pub title: String,
    pub year: i32,
}

#[derive(Debug, Serialize)]
pub struct BundleResponse {
    pub movie_id: u64,
    pub key: String,
    pub title: String,
    pub year: i32,
    pub people: usize,
    pub filmographies: usize,
}

impl From<&MovieBundle> for BundleResponse {
    fn from(bundle: &MovieBundle) -> Self {
        Self {
            movie_id: bundle.movie_id,
            key: bundle.key.clone(),
            title: bundle.title.clone(),
            year: bundle.year,
            people: bundle.people.len(),
            filmographies: bundle.filmographies.len(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub snapshot: GameSnapshot,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub key: String,
    pub setup_phase: bool,
    pub options: Vec<CandidateMove>,
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub removed: u64,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Build (or return the cached) bundle for a movie — the prefetch path
pub async fn build_bundle(
    State(state): State<AppState>,
    Json(request): Json<BundleRequest>,
) -> AppResult<(StatusCode, Json<BundleResponse>)> {
    let bundle = state.builder.build(&request.title, request.year).await?;
    Ok((StatusCode::CREATED, Json(BundleResponse::from(&bundle))))
}

/// Rank candidate moves for the current movie against a game snapshot
pub async fn rank_moves(
    State(state): State<AppState>,
    Json(request): Json<RankRequest>,
) -> AppResult<Json<RankResponse>> {
    if request.snapshot.game_over {
        return Ok(Json(RankResponse {
            key: movie_key(&request.title, request.year),
            setup_phase: false,
            options: Vec::new(),
        }));
    }

    let bundle = state.builder.build(&request.title, request.year).await?;

    let filter: PriorityFilter = state
        .cache
        .get_from_cache(&CacheKey::Filter)
        .await?
        .unwrap_or_default();

    let options = engine::rank(
        &bundle,
        &request.snapshot,
        &filter,
        Utc::now().year(),
        state.config.setup_popularity_floor,
    );

    tracing::info!(
        key = %bundle.key,
        options = options.len(),
        "Ranked candidate moves"
    );

    Ok(Json(RankResponse {
        key: bundle.key,
        setup_phase: request.snapshot.played.len() <= engine::SETUP_PHASE_MOVES,
        options,
    }))
}

/// Read the saved priority filter (inert default when none saved)
pub async fn get_filter(State(state): State<AppState>) -> AppResult<Json<PriorityFilter>> {
    let filter: PriorityFilter = state
        .cache
        .get_from_cache(&CacheKey::Filter)
        .await?
        .unwrap_or_default();
    Ok(Json(filter))
}

/// Save the priority filter — the one sanctioned external mutation
pub async fn put_filter(
    State(state): State<AppState>,
    Json(filter): Json<PriorityFilter>,
) -> AppResult<StatusCode> {
    state.cache.set(&CacheKey::Filter, &filter).await?;
    Ok(StatusCode::OK)
}

/// Save the provider credential on behalf of the settings surface
pub async fn put_token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> AppResult<StatusCode> {
    if request.token.trim().is_empty() {
        return Err(AppError::InvalidInput("Token cannot be empty".to_string()));
    }
    state.cache.set(&CacheKey::Credential, &request.token).await?;
    Ok(StatusCode::OK)
}

/// Wipe cached bundles and filmographies, keeping credential and filter
pub async fn clear_cache(State(state): State<AppState>) -> AppResult<Json<ClearResponse>> {
    let removed = state
        .cache
        .clear_preserving(&[CacheKey::Credential, CacheKey::Filter])
        .await?;
    Ok(Json(ClearResponse { removed }))
}
