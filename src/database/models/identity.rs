use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Top of the ownership hierarchy: an identity groups habit ids. The
/// references are plain ids; a listed habit may no longer exist.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Identity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub user_id: Uuid,
    pub habits: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct NewIdentity {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub habits: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct IdentityPatch {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub habits: Vec<Uuid>,
}
