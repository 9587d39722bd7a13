use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// TMDB API read access token (bearer). May also be supplied at runtime
    /// through the settings endpoint, in which case this can stay unset.
    pub tmdb_api_token: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Minimum spacing between outgoing TMDB requests, in milliseconds
    #[serde(default = "default_min_request_spacing_ms")]
    pub min_request_spacing_ms: u64,

    /// Popularity floor a credit must clear to count as a valid move during
    /// the first three turns of a match. Approximates the game's unpublished
    /// "top 5000 films" cutoff.
    #[serde(default = "default_setup_popularity_floor")]
    pub setup_popularity_floor: f64,

    /// Maximum number of people retained per movie bundle
    #[serde(default = "default_max_people_per_bundle")]
    pub max_people_per_bundle: usize,
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_min_request_spacing_ms() -> u64 {
    250
}

fn default_setup_popularity_floor() -> f64 {
    8.0
}

fn default_max_people_per_bundle() -> usize {
    30
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: Config = envy::from_iter(std::iter::empty::<(String, String)>()).unwrap();
        assert_eq!(config.redis_url, "redis://localhost:6379");
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb_api_token, None);
        assert_eq!(config.port, 3000);
        assert_eq!(config.min_request_spacing_ms, 250);
        assert_eq!(config.setup_popularity_floor, 8.0);
        assert_eq!(config.max_people_per_bundle, 30);
    }

    #[test]
    fn test_env_overrides() {
        let vars = vec![
            ("PORT".to_string(), "8088".to_string()),
            ("SETUP_POPULARITY_FLOOR".to_string(), "6.5".to_string()),
            ("TMDB_API_TOKEN".to_string(), "abc123".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.port, 8088);
        assert_eq!(config.setup_popularity_floor, 6.5);
        assert_eq!(config.tmdb_api_token, Some("abc123".to_string()));
    }
}
