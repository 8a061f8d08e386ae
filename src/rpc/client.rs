//! HTTP client for the database's JSON API.

use super::types::{ApiResponse, StatsTable, STATUS_SUCCESS};
use crate::utils::config::{API_PATH, DEFAULT_REQUEST_TIMEOUT};
use crate::utils::error::RpcError;
use log::{debug, info};
use reqwest::blocking::Client;
use std::time::Duration;

const STATISTICS_PROCEDURE: &str = "@Statistics";

/// Client for calling `@Statistics` over HTTP
pub struct VoltClient {
    client: Client,
    api_url: String,
    credentials: Option<(String, String)>,
}

impl VoltClient {
    /// Create a new client with the default timeout
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self, RpcError> {
        Self::with_timeout(endpoint, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a client with a custom timeout
    pub fn with_timeout(endpoint: impl AsRef<str>, timeout: Duration) -> Result<Self, RpcError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RpcError::RequestFailed)?;

        Ok(Self {
            client,
            api_url: api_url(endpoint.as_ref()),
            credentials: None,
        })
    }

    /// Send `User`/`Password` with every call
    pub fn with_credentials(
        mut self,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((user.into(), password.into()));
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Call `@Statistics <selector> 0` and return the first result table
    pub fn statistics(&self, selector: &str) -> Result<StatsTable, RpcError> {
        info!("Fetching {} statistics from {}", selector, self.api_url);

        // second parameter 0 = cumulative, not interval
        let parameters = serde_json::json!([selector, 0]).to_string();
        let mut query: Vec<(&str, &str)> = vec![
            ("Procedure", STATISTICS_PROCEDURE),
            ("Parameters", parameters.as_str()),
        ];
        if let Some((user, password)) = &self.credentials {
            query.push(("User", user.as_str()));
            query.push(("Password", password.as_str()));
        }

        debug!("API request: {} Parameters={}", STATISTICS_PROCEDURE, parameters);

        let response = self
            .client
            .get(&self.api_url)
            .query(&query)
            .send()
            .map_err(RpcError::RequestFailed)?;

        // Check HTTP status
        if !response.status().is_success() {
            return Err(RpcError::InvalidResponse(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().unwrap_or_default()
            )));
        }

        let api_response: ApiResponse = response.json().map_err(RpcError::RequestFailed)?;

        extract_table(api_response, selector)
    }
}

/// Check the status envelope and pull out the first table
pub fn extract_table(response: ApiResponse, selector: &str) -> Result<StatsTable, RpcError> {
    if response.status != STATUS_SUCCESS {
        return Err(RpcError::ProcedureFailed {
            procedure: format!("{} {}", STATISTICS_PROCEDURE, selector),
            status: response.status,
            message: response
                .statusstring
                .unwrap_or_else(|| "no status message".to_string()),
        });
    }

    response
        .results
        .and_then(|r| r.into_first())
        .ok_or_else(|| RpcError::InvalidResponse("Missing results table".to_string()))
}

/// Build the API URL from an endpoint, tolerating a trailing slash or a
/// full API path
pub fn api_url(endpoint: &str) -> String {
    let base = endpoint.trim_end_matches('/');
    let api = API_PATH.trim_end_matches('/');
    if base.ends_with(api) {
        format!("{}/", base)
    } else {
        format!("{}{}", base, API_PATH)
    }
}
