use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::habit::Habit;

/// A free-text log entry referencing zero or more habits by id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Log {
    pub id: Uuid,
    pub entry: String,
    pub user_id: Uuid,
    pub habits: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Read-time join result: a log enriched with the habit records its id set
/// resolves to. `habits_info` is computed by the join query and never
/// persisted; dangling habit ids are simply omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogWithHabits {
    #[serde(flatten)]
    pub log: Log,
    pub habits_info: Vec<Habit>,
}

#[derive(Debug, Deserialize)]
pub struct NewLog {
    pub entry: String,
    #[serde(default)]
    pub habits: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct LogPatch {
    pub entry: String,
    #[serde(default)]
    pub habits: Vec<Uuid>,
}
