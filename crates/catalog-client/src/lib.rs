//! Catalog client for the movie-recommendation REST service.
//!
//! This crate is the only place the client talks to the network. It handles:
//! - The `CatalogGateway` trait the rest of the workspace programs against
//! - An HTTP implementation on top of reqwest with a bounded timeout
//! - Strict decoding of every endpoint's JSON shape
//! - Classifying failures as network or decoding errors

pub mod models;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use session::MovieId;
use thiserror::Error;
use tracing::{debug, error, info};

pub use models::{
    split_genres, DatasetStats, MovieDetails, PopularMovie, RatedMovie, Recommendation,
    RecommendationRequest, SearchHit, SimilarMovie, Strategy,
};

/// Default address of the catalog service
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when talking to the catalog service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Invalid catalog client configuration: {0}")]
    Config(String),

    /// Transport failure or timeout
    #[error("Request to {endpoint} failed: {reason}")]
    Network { endpoint: String, reason: String },

    /// The service answered with a non-success status
    #[error("Request to {endpoint} was rejected with status {status}")]
    Rejected { endpoint: String, status: u16 },

    /// Body was not valid JSON or lacked required fields
    #[error("Invalid response from {endpoint}: {reason}")]
    Decoding { endpoint: String, reason: String },
}

impl GatewayError {
    /// Fetch rejected or timed out
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            GatewayError::Network { .. } | GatewayError::Rejected { .. }
        )
    }

    pub fn is_decoding(&self) -> bool {
        matches!(self, GatewayError::Decoding { .. })
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Connection settings for [`HttpCatalogClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the service, e.g. `http://localhost:5000`
    pub api_base: String,
    /// Applied to every request; expiry is reported as a network error
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// The catalog service as seen by the client.
///
/// Implemented over HTTP by [`HttpCatalogClient`]; tests substitute fakes.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    async fn stats(&self) -> Result<DatasetStats>;

    async fn popular_movies(&self) -> Result<Vec<PopularMovie>>;

    /// `query` is sent verbatim (URL-encoded); callers skip blank queries
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;

    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails>;

    async fn similar_movies(&self, movie_id: MovieId) -> Result<Vec<SimilarMovie>>;

    async fn recommendations(
        &self,
        strategy: Strategy,
        request: &RecommendationRequest,
    ) -> Result<Vec<Recommendation>>;
}

/// reqwest-backed gateway.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: Client,
    base: Url,
}

impl HttpCatalogClient {
    /// Build a client for `config.api_base`.
    ///
    /// Fails if the base URL cannot carry a path or the TLS backend cannot
    /// be initialised. No request is made here.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base = Url::parse(&config.api_base)
            .map_err(|e| GatewayError::Config(format!("{}: {}", config.api_base, e)))?;
        if base.cannot_be_a_base() {
            return Err(GatewayError::Config(format!(
                "{} cannot be used as an API base",
                config.api_base
            )));
        }

        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        info!(
            "Catalog client targeting {} (timeout {:?})",
            base, config.request_timeout
        );
        Ok(Self { http, base })
    }

    pub fn api_base(&self) -> &Url {
        &self.base
    }

    /// Append `segments` to the base path, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was ruled out in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| network_error(&url, e))?;
        decode(&url, response).await
    }

    async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        debug!("POST {}", url);
        let response = self
            .http
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| network_error(&url, e))?;
        decode(&url, response).await
    }
}

fn network_error(url: &Url, err: reqwest::Error) -> GatewayError {
    let reason = if err.is_timeout() {
        "timed out".to_string()
    } else {
        err.to_string()
    };
    error!("Request to {} failed: {}", url.path(), reason);
    GatewayError::Network {
        endpoint: url.path().to_string(),
        reason,
    }
}

/// Check the status, then decode the full body as `T`
async fn decode<T: DeserializeOwned>(url: &Url, response: Response) -> Result<T> {
    let endpoint = url.path().to_string();
    let status = response.status();
    if !status.is_success() {
        error!("{} answered with status {}", endpoint, status);
        return Err(GatewayError::Rejected {
            endpoint,
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(|e| network_error(url, e))?;
    serde_json::from_slice(&body).map_err(|e| {
        error!("Could not decode response from {}: {}", endpoint, e);
        GatewayError::Decoding {
            endpoint,
            reason: e.to_string(),
        }
    })
}

#[async_trait]
impl CatalogGateway for HttpCatalogClient {
    async fn stats(&self) -> Result<DatasetStats> {
        self.get_json(self.endpoint(&["api", "stats"])).await
    }

    async fn popular_movies(&self) -> Result<Vec<PopularMovie>> {
        self.get_json(self.endpoint(&["api", "movies", "popular"]))
            .await
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        self.get_json(self.endpoint(&["api", "movies", "search", query]))
            .await
    }

    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails> {
        let id = movie_id.to_string();
        self.get_json(self.endpoint(&["api", "movies", &id, "details"]))
            .await
    }

    async fn similar_movies(&self, movie_id: MovieId) -> Result<Vec<SimilarMovie>> {
        let id = movie_id.to_string();
        self.get_json(self.endpoint(&["api", "movies", &id, "similar"]))
            .await
    }

    async fn recommendations(
        &self,
        strategy: Strategy,
        request: &RecommendationRequest,
    ) -> Result<Vec<Recommendation>> {
        debug!(
            "Requesting {} recommendations from {} ratings",
            strategy,
            request.ratings.len()
        );
        self.post_json(self.endpoint(strategy.path_segments()), request)
            .await
    }
}
