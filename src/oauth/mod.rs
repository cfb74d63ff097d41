mod authenticate;
mod oauth_client;

pub use authenticate::{authenticate, authenticate_with, AuthCredentials};
pub use oauth_client::TokenResponse;

use reqwest::StatusCode;
use thiserror::Error;

/// Possible error types while obtaining an access token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token request could not be sent, or its response could not be read.
    #[error("failed to reach the token endpoint")]
    Transport(#[source] reqwest::Error),
    /// The token endpoint answered with a non-2xx status.
    #[error("token endpoint rejected the credentials with status {status}")]
    Rejected { status: StatusCode },
    #[error("failed to decode the token response")]
    Decode(#[source] serde_json::Error),
}
