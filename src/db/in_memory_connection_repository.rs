use async_trait::async_trait;
use dashmap::DashMap;
use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

use super::connection_repository::{ConnectionError, ConnectionRepository};
use crate::models::connection::{ConnectionRecord, NewConnection};

/// Connection store backed by a concurrent map from account id to the
/// account's connection records.
#[derive(Default)]
pub struct InMemoryConnectionRepository {
    connections: DashMap<Uuid, Vec<ConnectionRecord>>,
}

impl InMemoryConnectionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRepository for InMemoryConnectionRepository {
    async fn add_connection(
        &self,
        new_connection: NewConnection,
    ) -> Result<ConnectionRecord, ConnectionError> {
        let mut records = self
            .connections
            .entry(new_connection.account_id)
            .or_default();

        let duplicate = records
            .iter()
            .any(|record| record.access_token == new_connection.access_token);
        if duplicate {
            warn!(
                account_id = %new_connection.account_id,
                provider = %new_connection.provider_id,
                "rejected duplicate connection for access token already on file"
            );
            return Err(ConnectionError::DuplicateConnection {
                account_id: new_connection.account_id,
            });
        }

        let record = ConnectionRecord {
            id: Uuid::new_v4(),
            account_id: new_connection.account_id,
            provider_id: new_connection.provider_id,
            access_token: new_connection.access_token,
            access_token_secret: new_connection.access_token_secret,
            created_at: OffsetDateTime::now_utc(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn connections_for_account(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<ConnectionRecord>, ConnectionError> {
        Ok(self
            .connections
            .get(&account_id)
            .map(|records| records.value().clone())
            .unwrap_or_default())
    }

    async fn is_connected(&self, account_id: Uuid) -> Result<bool, ConnectionError> {
        Ok(self
            .connections
            .get(&account_id)
            .map(|records| !records.is_empty())
            .unwrap_or(false))
    }

    async fn remove_connection(
        &self,
        account_id: Uuid,
        connection_id: Uuid,
    ) -> Result<(), ConnectionError> {
        let removed = match self.connections.get_mut(&account_id) {
            Some(mut records) => {
                match records.iter().position(|record| record.id == connection_id) {
                    Some(index) => {
                        records.remove(index);
                        true
                    }
                    None => false,
                }
            }
            None => false,
        };

        if !removed {
            return Err(ConnectionError::NotConnected { connection_id });
        }

        // Drop the account entry once its last connection is gone.
        self.connections
            .remove_if(&account_id, |_, records| records.is_empty());
        Ok(())
    }
}
