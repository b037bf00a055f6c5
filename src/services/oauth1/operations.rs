use async_trait::async_trait;

use super::errors::OAuth1Error;
use crate::models::token::{AuthorizedRequestToken, OAuthToken};

/// The three-legged OAuth1 dance as seen by the connection layer: fetch a
/// request token, send the member off to authorize it, then trade the
/// authorized token for an access token.
#[async_trait]
pub trait OAuth1Operations: Send + Sync {
    async fn fetch_request_token(&self, callback_url: &str) -> Result<OAuthToken, OAuth1Error>;

    /// URL the member should be redirected to so they can authorize the
    /// request token. Appends the callback when the provider expects it as a
    /// query parameter rather than at the request-token step.
    fn build_authorize_url(&self, request_token: &str, callback_url: Option<&str>) -> String;

    async fn exchange_for_access_token(
        &self,
        authorized_token: &AuthorizedRequestToken,
    ) -> Result<OAuthToken, OAuth1Error>;
}
