use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::db::connection_repository::{ConnectionError, ConnectionRepository};
use crate::models::connection::{ConnectionRecord, NewConnection};
use crate::models::token::{OAuth1Credentials, OAuthToken};
use crate::services::oauth1::OAuth1Operations;

/// A provider-specific API binding, built from the credentials captured when
/// the account was connected.
pub trait ServiceApi {
    fn from_credentials(credentials: OAuth1Credentials) -> Self;
}

/// Facade for one OAuth1 provider: runs connect/disconnect bookkeeping
/// against the connection repository and hands out API bindings. The OAuth1
/// dance itself lives behind [`OAuth1Operations`].
pub struct OAuth1ServiceProvider<A> {
    provider_id: String,
    consumer_key: String,
    consumer_secret: String,
    repository: Arc<dyn ConnectionRepository>,
    oauth: Arc<dyn OAuth1Operations>,
    _api: PhantomData<fn() -> A>,
}

impl<A: ServiceApi> OAuth1ServiceProvider<A> {
    pub fn new(
        provider_id: impl Into<String>,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        repository: Arc<dyn ConnectionRepository>,
        oauth: Arc<dyn OAuth1Operations>,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            repository,
            oauth,
            _api: PhantomData,
        }
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn oauth_operations(&self) -> &dyn OAuth1Operations {
        self.oauth.as_ref()
    }

    /// Links the account to the provider using the access token obtained from
    /// the OAuth1 dance. Fails when the account already holds a connection
    /// for this access token.
    pub async fn connect(
        &self,
        account_id: Uuid,
        access_token: OAuthToken,
    ) -> Result<Connection<A>, ConnectionError> {
        let OAuthToken { value, secret } = access_token;
        let record = self
            .repository
            .add_connection(NewConnection {
                account_id,
                provider_id: self.provider_id.clone(),
                access_token: value,
                access_token_secret: secret,
            })
            .await?;

        info!(
            %account_id,
            provider = %self.provider_id,
            connection_id = %record.id,
            "account connected"
        );
        Ok(self.wrap(record))
    }

    pub async fn is_connected(&self, account_id: Uuid) -> Result<bool, ConnectionError> {
        self.repository.is_connected(account_id).await
    }

    /// Live handles for every connection the account holds with this
    /// provider's repository, each wrapping a freshly built API binding.
    pub async fn connections(&self, account_id: Uuid) -> Result<Vec<Connection<A>>, ConnectionError> {
        let records = self.repository.connections_for_account(account_id).await?;
        Ok(records.into_iter().map(|record| self.wrap(record)).collect())
    }

    fn wrap(&self, record: ConnectionRecord) -> Connection<A> {
        let api = A::from_credentials(OAuth1Credentials {
            consumer_key: self.consumer_key.clone(),
            consumer_secret: self.consumer_secret.clone(),
            access_token: record.access_token.clone(),
            access_token_secret: record.access_token_secret.clone(),
        });
        Connection {
            record,
            api,
            repository: Arc::clone(&self.repository),
            disconnected: AtomicBool::new(false),
        }
    }
}

/// Live handle over a stored connection. Disconnecting removes the record
/// from the repository and poisons this handle; equality compares the
/// underlying records, so a handle returned by `connect` equals the handle
/// read back through `connections`.
pub struct Connection<A> {
    record: ConnectionRecord,
    api: A,
    repository: Arc<dyn ConnectionRepository>,
    disconnected: AtomicBool,
}

impl<A> Connection<A> {
    pub fn record(&self) -> &ConnectionRecord {
        &self.record
    }

    pub fn api(&self) -> Result<&A, ConnectionError> {
        if self.disconnected.load(Ordering::Acquire) {
            return Err(ConnectionError::NotConnected {
                connection_id: self.record.id,
            });
        }
        Ok(&self.api)
    }

    pub async fn disconnect(&self) -> Result<(), ConnectionError> {
        if self.disconnected.swap(true, Ordering::AcqRel) {
            return Err(ConnectionError::NotConnected {
                connection_id: self.record.id,
            });
        }
        self.repository
            .remove_connection(self.record.account_id, self.record.id)
            .await?;

        info!(
            account_id = %self.record.account_id,
            provider = %self.record.provider_id,
            connection_id = %self.record.id,
            "account disconnected"
        );
        Ok(())
    }
}

impl<A> PartialEq for Connection<A> {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
    }
}

impl<A> fmt::Debug for Connection<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("record", &self.record)
            .field("disconnected", &self.disconnected.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::in_memory_connection_repository::InMemoryConnectionRepository;
    use crate::models::token::AuthorizedRequestToken;
    use crate::services::oauth1::StubOAuth1Operations;

    #[derive(Debug)]
    struct TestApi {
        credentials: OAuth1Credentials,
    }

    impl TestApi {
        fn greet(&self, name: &str) -> String {
            format!("Hello {name}!")
        }
    }

    impl ServiceApi for TestApi {
        fn from_credentials(credentials: OAuth1Credentials) -> Self {
            Self { credentials }
        }
    }

    fn test_provider() -> OAuth1ServiceProvider<TestApi> {
        OAuth1ServiceProvider::new(
            "test",
            "54321",
            "65432",
            Arc::new(InMemoryConnectionRepository::new()),
            Arc::new(StubOAuth1Operations::default()),
        )
    }

    #[tokio::test]
    async fn connect_flow() {
        let provider = test_provider();
        let account_id = Uuid::new_v4();

        // preconditions
        assert!(!provider.is_connected(account_id).await.unwrap());
        assert!(provider.connections(account_id).await.unwrap().is_empty());

        // oauth 1 dance
        let oauth = provider.oauth_operations();
        let request_token = oauth
            .fetch_request_token("http://localhost:8080/me")
            .await
            .unwrap();
        let authorize_url = oauth.build_authorize_url(&request_token.value, None);
        assert_eq!(
            authorize_url,
            "https://provider.example.com/oauth/authorize?request_token=12345"
        );
        let access_token = oauth
            .exchange_for_access_token(&AuthorizedRequestToken::new(request_token, "verifier"))
            .await
            .unwrap();

        // connect
        let connection = provider.connect(account_id, access_token).await.unwrap();
        let api = connection.api().unwrap();
        assert_eq!(api.greet("Keith"), "Hello Keith!");
        assert_eq!(api.credentials.consumer_key, "54321");
        assert_eq!(api.credentials.consumer_secret, "65432");
        assert_eq!(api.credentials.access_token, "34567");
        assert_eq!(api.credentials.access_token_secret, "45678");

        // postconditions
        assert!(provider.is_connected(account_id).await.unwrap());
        let connections = provider.connections(account_id).await.unwrap();
        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].api().unwrap().greet("Keith"), "Hello Keith!");
    }

    #[tokio::test]
    async fn handle_equals_repository_read_back() {
        let provider = test_provider();
        let account_id = Uuid::new_v4();

        let connection = provider
            .connect(account_id, OAuthToken::new("12345", "23456"))
            .await
            .unwrap();
        let connections = provider.connections(account_id).await.unwrap();
        assert_eq!(connection, connections[0]);
    }

    #[tokio::test]
    async fn duplicate_connection_is_rejected() {
        let provider = test_provider();
        let account_id = Uuid::new_v4();

        provider
            .connect(account_id, OAuthToken::new("12345", "23456"))
            .await
            .unwrap();
        let err = provider
            .connect(account_id, OAuthToken::new("12345", "23456"))
            .await
            .unwrap_err();
        assert_eq!(err, ConnectionError::DuplicateConnection { account_id });
    }

    #[tokio::test]
    async fn disconnect_removes_connection_and_poisons_handle() {
        let provider = test_provider();
        let account_id = Uuid::new_v4();

        let connection = provider
            .connect(account_id, OAuthToken::new("12345", "23456"))
            .await
            .unwrap();
        assert_eq!(connection.api().unwrap().greet("Keith"), "Hello Keith!");

        connection.disconnect().await.unwrap();
        assert!(!provider.is_connected(account_id).await.unwrap());
        assert!(provider.connections(account_id).await.unwrap().is_empty());

        let expected = ConnectionError::NotConnected {
            connection_id: connection.record().id,
        };
        assert_eq!(connection.api().unwrap_err(), expected);
        assert_eq!(connection.disconnect().await.unwrap_err(), expected);
    }

    #[tokio::test]
    async fn disconnect_through_stale_handle_fails_once_record_is_gone() {
        let provider = test_provider();
        let account_id = Uuid::new_v4();

        let connection = provider
            .connect(account_id, OAuthToken::new("12345", "23456"))
            .await
            .unwrap();
        let stale = provider
            .connections(account_id)
            .await
            .unwrap()
            .remove(0);

        connection.disconnect().await.unwrap();
        let err = stale.disconnect().await.unwrap_err();
        assert_eq!(
            err,
            ConnectionError::NotConnected {
                connection_id: stale.record().id,
            }
        );
    }
}
