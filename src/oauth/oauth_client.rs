use serde::Deserialize;
use tracing::{debug, warn};

use super::{AuthCredentials, AuthError};

/// The path of the token endpoint, relative to the vendor's base URL.
const ACCESS_TOKEN_PATH: &str = "/oauth/token";

/// The response body of a successful password grant.
///
/// Only `access_token` is required. The vendor documents the remaining
/// fields, but we never act on them.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenResponse {
    pub fn from_json(contents: &str) -> Result<Self, AuthError> {
        serde_json::from_str(contents).map_err(AuthError::Decode)
    }
}

/// Builds the token endpoint URL, tolerating a trailing slash on the base.
pub(super) fn token_endpoint(base_url: &str) -> String {
    format!("{}{ACCESS_TOKEN_PATH}", base_url.trim_end_matches('/'))
}

/// Exchange the given credentials for a token via the OAuth2 password grant.
pub(super) async fn obtain_access_token(
    client: &reqwest::Client,
    base_url: &str,
    credentials: &AuthCredentials,
) -> Result<TokenResponse, AuthError> {
    let endpoint = token_endpoint(base_url);
    debug!(%endpoint, username = %credentials.username, "requesting access token");

    let result = client
        .post(&endpoint)
        .form(&[
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("grant_type", "password"),
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ])
        .send()
        .await
        .map_err(AuthError::Transport)?;

    let status = result.status();
    if !status.is_success() {
        warn!(%status, "non-2xx response from token endpoint");
        return Err(AuthError::Rejected { status });
    }

    let response_text = result.text().await.map_err(AuthError::Transport)?;
    TokenResponse::from_json(&response_text)
}
