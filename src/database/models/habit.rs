use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A tracked habit, optionally grouped under an identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub user_id: Uuid,
    pub identity: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Create request body. The owner id is stamped server-side from the
/// authenticated caller, never read from the body.
#[derive(Debug, Deserialize)]
pub struct NewHabit {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub identity: Option<Uuid>,
}

/// Update request body: the full set of mutable fields. `id` and `user_id`
/// are not part of this type, so client input can never overwrite them.
#[derive(Debug, Deserialize)]
pub struct HabitPatch {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub identity: Option<Uuid>,
}
