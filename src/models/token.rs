use serde::{Deserialize, Serialize};

/// A value/secret pair issued by an OAuth1 provider. The same shape covers
/// request tokens and access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthToken {
    pub value: String,
    pub secret: String,
}

impl OAuthToken {
    pub fn new(value: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            secret: secret.into(),
        }
    }
}

/// A request token the member has authorized, paired with the verifier the
/// provider handed back from the authorization step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedRequestToken {
    pub token: OAuthToken,
    pub verifier: String,
}

impl AuthorizedRequestToken {
    pub fn new(token: OAuthToken, verifier: impl Into<String>) -> Self {
        Self {
            token,
            verifier: verifier.into(),
        }
    }
}

/// The full credential set a service API binding needs to sign requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuth1Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}
