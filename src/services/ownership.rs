//! Ownership guard: the single authorization chokepoint for mutate/delete.

use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::User;
use crate::database::StoreError;
use crate::error::ApiError;

/// The guarded entity kinds. One check serves all three, parameterized by
/// kind: a Log update is gated by Log ownership, a Habit update by Habit
/// ownership, never by another kind's record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Identity,
    Habit,
    Log,
}

impl EntityKind {
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Identity => "identities",
            EntityKind::Habit => "habits",
            EntityKind::Log => "logs",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            EntityKind::Identity => "identity",
            EntityKind::Habit => "habit",
            EntityKind::Log => "log entry",
        }
    }
}

/// Loads the target record's owner id and checks it against the caller.
/// Absent record: 404. Owner mismatch: 403. Invoked before every update
/// and delete on all three kinds.
pub async fn ensure_owner(
    pool: &PgPool,
    kind: EntityKind,
    id: Uuid,
    caller: &User,
) -> Result<(), ApiError> {
    let sql = format!("SELECT user_id FROM {} WHERE id = $1", kind.collection());

    let owner_id: Option<Uuid> = sqlx::query_scalar(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(StoreError::from)?;

    match owner_id {
        None => Err(ApiError::not_found(format!("{} not found", kind.label()))),
        Some(owner_id) if owner_id != caller.id => {
            tracing::warn!("user {} denied write on {} {}", caller.username, kind.label(), id);
            Err(ApiError::forbidden("permission denied"))
        }
        Some(_) => Ok(()),
    }
}
