use async_trait::async_trait;
use urlencoding::encode;

use super::errors::OAuth1Error;
use super::operations::OAuth1Operations;
use crate::models::token::{AuthorizedRequestToken, OAuthToken};

/// Canned-response OAuth1 client. Stands in for a real provider client in
/// tests and local development; every call succeeds with the configured
/// tokens.
pub struct StubOAuth1Operations {
    pub request_token: OAuthToken,
    pub access_token: OAuthToken,
    pub authorize_url: String,
}

impl Default for StubOAuth1Operations {
    fn default() -> Self {
        Self {
            request_token: OAuthToken::new("12345", "23456"),
            access_token: OAuthToken::new("34567", "45678"),
            authorize_url: "https://provider.example.com/oauth/authorize".into(),
        }
    }
}

#[async_trait]
impl OAuth1Operations for StubOAuth1Operations {
    async fn fetch_request_token(&self, _callback_url: &str) -> Result<OAuthToken, OAuth1Error> {
        Ok(self.request_token.clone())
    }

    fn build_authorize_url(&self, request_token: &str, callback_url: Option<&str>) -> String {
        let mut url = format!("{}?request_token={}", self.authorize_url, encode(request_token));
        if let Some(callback_url) = callback_url {
            url.push_str("&oauth_callback=");
            url.push_str(&encode(callback_url));
        }
        url
    }

    async fn exchange_for_access_token(
        &self,
        _authorized_token: &AuthorizedRequestToken,
    ) -> Result<OAuthToken, OAuth1Error> {
        Ok(self.access_token.clone())
    }
}
