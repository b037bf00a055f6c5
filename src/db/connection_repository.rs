use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::connection::{ConnectionRecord, NewConnection};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("account {account_id} already has a connection for this access token")]
    DuplicateConnection { account_id: Uuid },
    #[error("connection {connection_id} is not connected")]
    NotConnected { connection_id: Uuid },
}

#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Inserts a new connection for the account. Rejects the insert when the
    /// account already holds a connection with the same access token.
    async fn add_connection(
        &self,
        new_connection: NewConnection,
    ) -> Result<ConnectionRecord, ConnectionError>;

    /// Connections for the account, in insertion order. Empty for accounts
    /// that were never connected.
    async fn connections_for_account(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<ConnectionRecord>, ConnectionError>;

    async fn is_connected(&self, account_id: Uuid) -> Result<bool, ConnectionError>;

    /// Removes a stored connection. Fails when the account has no connection
    /// with this id.
    async fn remove_connection(
        &self,
        account_id: Uuid,
        connection_id: Uuid,
    ) -> Result<(), ConnectionError>;
}
