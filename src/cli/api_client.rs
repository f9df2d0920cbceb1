use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::env;

use crate::cli::error::{CliError, CliResult};

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "MRELLO_API_URL";
/// Environment variable holding the bearer token.
pub const TOKEN_ENV: &str = "MRELLO_TOKEN";

pub const DEFAULT_API_URL: &str = "http://localhost:5001";

/// API client for communicating with the mrello REST API
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// Priority for base URL:
    /// 1. Explicit `api_url` parameter
    /// 2. MRELLO_API_URL environment variable
    /// 3. Default: http://localhost:5001
    ///
    /// The token follows the same rule with MRELLO_TOKEN and no default.
    pub fn new(api_url: Option<String>, token: Option<String>) -> Self {
        let base_url = api_url
            .or_else(|| env::var(API_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let token = token
            .or_else(|| env::var(TOKEN_ENV).ok())
            .filter(|t| !t.is_empty());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: Client::new(),
        }
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Fail early when a command needs a token and none was given.
    pub fn require_token(&self) -> CliResult<&str> {
        self.token().ok_or(CliError::MissingToken)
    }

    /// Create a GET request builder
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.get(self.url(path)))
    }

    /// Create a POST request builder
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.post(self.url(path)))
    }

    /// Create a PUT request builder
    pub fn put(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.put(self.url(path)))
    }

    /// Create a DELETE request builder
    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.delete(self.url(path)))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Handle API response with standardized error handling
    ///
    /// Returns the deserialized response body on success,
    /// or a CliError::ApiError carrying the server's `error` message.
    pub async fn handle_response<T: DeserializeOwned>(response: Response) -> CliResult<T> {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| CliError::InvalidResponse {
                    message: e.to_string(),
                })
        } else {
            let status = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(CliError::ApiError {
                status,
                message: error_message(&error_text),
            })
        }
    }
}

/// Pull `error` out of a `{"error": "..."}` body, or return the body as is.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
