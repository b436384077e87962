//! OpenF1 API client
//!
//! This module fetches race sessions, race results and the driver roster from the
//! OpenF1 REST API and parses them into our data structures.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use super::{Driver, RaceResult, Session};

/// Base URL for the OpenF1 API
pub const OPENF1_BASE_URL: &str = "https://api.openf1.org/v1";

/// Only race sessions are queried
const RACE_SESSION_NAME: &str = "Race";

/// Errors that can occur when fetching from the API
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Client for the OpenF1 API
#[derive(Debug, Clone)]
pub struct OpenF1Client {
    client: Client,
    base_url: String,
}

impl OpenF1Client {
    /// Creates a client for `base_url` whose requests give up after `timeout`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a client with a custom HTTP client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// The base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches every race session of `year`, in the order the API returns them
    pub async fn fetch_race_sessions(&self, year: i32) -> Result<Vec<Session>, ApiError> {
        self.get_json(
            "sessions",
            &[
                ("year", year.to_string()),
                ("session_name", RACE_SESSION_NAME.to_string()),
            ],
        )
        .await
    }

    /// Fetches the classification of one session
    pub async fn fetch_results(&self, session_key: u32) -> Result<Vec<RaceResult>, ApiError> {
        self.get_json("results", &[("session_key", session_key.to_string())])
            .await
    }

    /// Fetches the driver roster of `year`
    pub async fn fetch_drivers(&self, year: i32) -> Result<Vec<Driver>, ApiError> {
        self.get_json("drivers", &[("year", year.to_string())]).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        debug!(%url, ?query, "requesting");

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> OpenF1Client {
        OpenF1Client::with_client(Client::new(), base_url)
    }

    #[test]
    fn test_endpoint_joins_path() {
        assert_eq!(
            client(OPENF1_BASE_URL).endpoint("sessions"),
            "https://api.openf1.org/v1/sessions"
        );
    }

    #[test]
    fn test_endpoint_ignores_trailing_slash() {
        assert_eq!(
            client("http://localhost:8080/v1/").endpoint("drivers"),
            "http://localhost:8080/v1/drivers"
        );
    }

    #[test]
    fn test_new_keeps_base_url() {
        let client = OpenF1Client::new("http://example.test", Duration::from_secs(5))
            .expect("Client should build");
        assert_eq!(client.base_url(), "http://example.test");
    }

    #[test]
    fn test_status_error_message() {
        let err = ApiError::Status {
            status: 503,
            url: "https://api.openf1.org/v1/results".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 503 from https://api.openf1.org/v1/results"
        );
    }

    #[test]
    fn test_parse_error_wraps_serde() {
        let serde_err = serde_json::from_str::<Vec<Session>>("not json").unwrap_err();
        let err = ApiError::from(serde_err);
        assert!(err.to_string().contains("Failed to parse JSON response"));
    }
}
