// services/oauth1/errors.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OAuth1Error {
    #[error("request token fetch failed: {0}")]
    RequestTokenFailed(String),
    #[error("access token exchange failed: {0}")]
    AccessTokenExchangeFailed(String),
}
