use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVar(String),
}

/// Consumer credentials registered with an OAuth1 provider, loaded from the
/// environment. A provider configured with prefix `TWITTER` reads
/// `TWITTER_CONSUMER_KEY` and `TWITTER_CONSUMER_SECRET`.
#[derive(Debug, Clone)]
pub struct OAuth1ProviderConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
}

impl OAuth1ProviderConfig {
    pub fn from_env(prefix: &str) -> Self {
        match Self::try_from_env(prefix) {
            Ok(config) => config,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_from_env(prefix: &str) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok(); // Load .env file

        let consumer_key = require_var(&format!("{prefix}_CONSUMER_KEY"))?;
        let consumer_secret = require_var(&format!("{prefix}_CONSUMER_SECRET"))?;

        Ok(OAuth1ProviderConfig {
            consumer_key,
            consumer_secret,
        })
    }
}

fn require_var(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingVar(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_prefixed_consumer_credentials() {
        env::set_var("CFGTEST_OK_CONSUMER_KEY", "54321");
        env::set_var("CFGTEST_OK_CONSUMER_SECRET", "65432");

        let config = OAuth1ProviderConfig::try_from_env("CFGTEST_OK").unwrap();
        assert_eq!(config.consumer_key, "54321");
        assert_eq!(config.consumer_secret, "65432");
    }

    #[test]
    fn missing_credentials_surface_the_variable_name() {
        let err = OAuth1ProviderConfig::try_from_env("CFGTEST_MISSING").unwrap_err();
        assert_eq!(
            err.to_string(),
            "CFGTEST_MISSING_CONSUMER_KEY must be set"
        );
    }
}
