use std::fmt;

use super::{oauth_client, AuthError};

/// Everything the password grant needs, in a struct out of ease.
///
/// These are never persisted. `Debug` redacts the secret and password.
#[derive(Clone)]
pub struct AuthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for AuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Obtain an access token from the vendor at `base_url`.
///
/// A new HTTP client is created for this call. Only the access token is
/// returned; expiry and refresh token are discarded.
pub async fn authenticate(
    base_url: &str,
    credentials: &AuthCredentials,
) -> Result<String, AuthError> {
    authenticate_with(&reqwest::Client::new(), base_url, credentials).await
}

/// Same as [`authenticate`], but reusing the given client.
pub async fn authenticate_with(
    client: &reqwest::Client,
    base_url: &str,
    credentials: &AuthCredentials,
) -> Result<String, AuthError> {
    let token = oauth_client::obtain_access_token(client, base_url, credentials).await?;
    Ok(token.access_token)
}
