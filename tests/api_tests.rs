use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;

use linkscout::api::{create_router, AppState};
use linkscout::config::Config;
use linkscout::db::{create_redis_client, Cache};
use linkscout::error::AppResult;
use linkscout::models::{CastMember, Credit, MovieCredits, MovieRef, PersonCredits};
use linkscout::services::providers::MetadataProvider;
use linkscout::services::BundleBuilder;

/// Canned provider: knows one movie ("Heat (1995)", id 949) with two
/// performers whose filmographies differ in depth.
struct StubProvider;

fn heat() -> MovieRef {
    MovieRef {
        id: 949,
        title: "Heat".to_string(),
        year: Some(1995),
        genre_ids: vec![28, 80, 18],
        popularity: 31.4,
    }
}

fn performer_credit(movie_id: u64, title: &str, year: i32, popularity: f64) -> Credit {
    Credit {
        movie_id,
        title: title.to_string(),
        year,
        genre_ids: vec![28],
        popularity,
        role: "Performer".to_string(),
    }
}

#[async_trait::async_trait]
impl MetadataProvider for StubProvider {
    async fn search_movie(&self, title: &str, _year: i32) -> AppResult<Vec<MovieRef>> {
        if title.eq_ignore_ascii_case("heat") {
            Ok(vec![heat()])
        } else {
            Ok(vec![])
        }
    }

    async fn movie_details(&self, _movie_id: u64) -> AppResult<MovieRef> {
        Ok(heat())
    }

    async fn movie_credits(&self, _movie_id: u64) -> AppResult<MovieCredits> {
        Ok(MovieCredits {
            cast: vec![
                CastMember {
                    id: 2,
                    name: "Robert De Niro".to_string(),
                    popularity: 50.0,
                },
                CastMember {
                    id: 1,
                    name: "Al Pacino".to_string(),
                    popularity: 45.0,
                },
            ],
            crew: vec![],
        })
    }

    async fn person_movie_credits(&self, person_id: u64) -> AppResult<PersonCredits> {
        let performer = match person_id {
            // Deeper filmography
            2 => vec![
                performer_credit(522, "Ronin", 1998, 20.0),
                performer_credit(111, "Casino", 1995, 25.0),
                performer_credit(240, "The Godfather Part II", 1974, 40.0),
            ],
            1 => vec![performer_credit(522, "Ronin", 1998, 20.0)],
            _ => vec![],
        };
        Ok(PersonCredits {
            performer,
            crew: vec![],
        })
    }
}

/// Tests run in parallel, so each Redis-backed test gets its own logical
/// database index.
fn test_config(redis_db: u8) -> Config {
    let base =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    Config {
        redis_url: format!("{}/{}", base, redis_db),
        tmdb_api_url: "http://test.local".to_string(),
        tmdb_api_token: Some("test-token".to_string()),
        host: "127.0.0.1".to_string(),
        port: 0,
        min_request_spacing_ms: 250,
        setup_popularity_floor: 8.0,
        max_people_per_bundle: 30,
    }
}

async fn create_test_server(redis_db: u8) -> TestServer {
    let config = test_config(redis_db);
    let redis_client = create_redis_client(&config.redis_url).unwrap();
    let (cache, _handle) = Cache::new(redis_client).await;

    let builder = BundleBuilder::new(
        Arc::new(StubProvider),
        cache.clone(),
        config.max_people_per_bundle,
    );

    let state = AppState::new(config, cache, builder);
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(0).await;
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_rank_after_game_over_is_empty() {
    // The game-over path never touches Redis or the provider
    let server = create_test_server(0).await;

    let response = server
        .post("/rank")
        .json(&json!({
            "title": "Heat",
            "year": 1995,
            "snapshot": { "game_over": true }
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["key"], "Heat (1995)");
    assert_eq!(body["options"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_put_token_rejects_empty() {
    let server = create_test_server(1).await;

    let response = server
        .put("/settings/token")
        .json(&json!({ "token": "   " }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a local Redis at REDIS_URL (default redis://localhost:6379)"]
async fn test_rank_flow_orders_and_dedupes() {
    let server = create_test_server(2).await;

    // Start from an empty cache
    server.post("/cache/clear").await.assert_status_ok();

    let response = server
        .post("/rank")
        .json(&json!({
            "title": "Heat",
            "year": 1995,
            "snapshot": {
                "played": ["A (1990)", "B (1991)", "C (1992)", "D (1993)"],
                "used_links": []
            }
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["key"], "Heat (1995)");
    assert_eq!(body["setup_phase"], false);

    let options = body["options"].as_array().unwrap();
    // Ronin reachable via both performers shows once, under the deeper
    // connection; Casino and The Godfather Part II follow
    assert_eq!(options.len(), 3);
    assert_eq!(options[0]["key"], "Ronin (1998)");
    assert_eq!(options[0]["via_person"], "Robert De Niro");
    assert_eq!(options[0]["score"], 3);
    assert!(options.iter().all(|o| o["movie_id"] != 949));
}

#[tokio::test]
#[ignore = "requires a local Redis at REDIS_URL (default redis://localhost:6379)"]
async fn test_rank_unknown_movie_is_not_found() {
    let server = create_test_server(3).await;
    server.post("/cache/clear").await.assert_status_ok();

    let response = server
        .post("/rank")
        .json(&json!({ "title": "Nonexistent Film", "year": 1900 }))
        .await;

    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a local Redis at REDIS_URL (default redis://localhost:6379)"]
async fn test_filter_round_trip_and_priority_ranking() {
    let server = create_test_server(4).await;
    server.post("/cache/clear").await.assert_status_ok();

    // Unset filter reads back inert
    let response = server.get("/settings/filter").await;
    response.assert_status_ok();
    let filter: serde_json::Value = response.json();
    assert_eq!(filter["genre_ids"].as_array().unwrap().len(), 0);
    assert_eq!(filter["decade"], serde_json::Value::Null);

    // Save a 1990s action filter and re-read it
    let response = server
        .put("/settings/filter")
        .json(&json!({ "genre_ids": [28], "decade": 1990 }))
        .await;
    response.assert_status_ok();

    let response = server.get("/settings/filter").await;
    let filter: serde_json::Value = response.json();
    assert_eq!(filter["decade"], 1990);

    // The saved filter now splits priority from the rest
    let response = server
        .post("/rank")
        .json(&json!({
            "title": "Heat",
            "year": 1995,
            "snapshot": {
                "played": ["A (1990)", "B (1991)", "C (1992)", "D (1993)"]
            }
        }))
        .await;
    let body: serde_json::Value = response.json();
    let options = body["options"].as_array().unwrap();
    assert_eq!(options[0]["key"], "Ronin (1998)");
    assert_eq!(options[0]["is_priority"], true);
    assert_eq!(
        options.last().unwrap()["key"],
        "The Godfather Part II (1974)"
    );
    assert_eq!(options.last().unwrap()["is_priority"], false);
}

#[tokio::test]
#[ignore = "requires a local Redis at REDIS_URL (default redis://localhost:6379)"]
async fn test_cache_clear_preserves_settings() {
    let server = create_test_server(5).await;

    server
        .put("/settings/token")
        .json(&json!({ "token": "kept-across-clear" }))
        .await
        .assert_status_ok();
    server
        .put("/settings/filter")
        .json(&json!({ "genre_ids": [27], "decade": 1980 }))
        .await
        .assert_status_ok();

    // Populate a bundle, then wipe
    server
        .post("/bundles")
        .json(&json!({ "title": "Heat", "year": 1995 }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
    server.post("/cache/clear").await.assert_status_ok();

    let response = server.get("/settings/filter").await;
    let filter: serde_json::Value = response.json();
    assert_eq!(filter["decade"], 1980);
}
