use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

/// The vendor's API root. Orders live beneath `/{organization_id}/orders`.
pub const DEFAULT_API_BASE: &str = "https://example.com/api/v3";

#[derive(Debug)]
pub struct ApiClient {
    /// The bearer token sent along with every API request.
    access_token: String,
    /// The API root requests are made against.
    base_url: Url,
    http: reqwest::Client,
}

/// Possible error types while working with the orders API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API base URL")]
    InvalidBaseUrl(#[from] url::ParseError),
    /// The base URL cannot carry path segments (e.g. `mailto:` or `data:`).
    #[error("cannot build an orders request against {0}")]
    RequestBuild(Url),
    #[error("failed to perform orders request")]
    Transport(#[source] reqwest::Error),
    #[error("orders request failed with status {status}")]
    Status { status: StatusCode },
    #[error("failed to read orders response body")]
    Body(#[source] reqwest::Error),
    #[error("failed to write orders to {}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiClient {
    /// Creates a new API client around the given access token.
    pub fn new(access_token: String) -> Result<Self, ApiError> {
        Self::with_base_url(access_token, DEFAULT_API_BASE)
    }

    /// Creates a new API client against a different API root.
    pub fn with_base_url(access_token: String, base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::RequestBuild(base_url));
        }

        Ok(Self {
            access_token,
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Swaps the underlying HTTP client, e.g. to share a connection pool.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub(super) fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(super) fn access_token(&self) -> &str {
        &self.access_token
    }

    pub(super) fn http(&self) -> &reqwest::Client {
        &self.http
    }
}
