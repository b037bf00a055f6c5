use time::OffsetDateTime;
use uuid::Uuid;

/// A stored link between a local account and a provider account.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionRecord {
    pub id: Uuid,
    pub account_id: Uuid,
    pub provider_id: String,
    pub access_token: String,
    pub access_token_secret: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewConnection {
    pub account_id: Uuid,
    pub provider_id: String,
    pub access_token: String,
    pub access_token_secret: String,
}
