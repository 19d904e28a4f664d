//! Owner-scoped queries for the identities collection.

use sqlx::PgPool;
use uuid::Uuid;

use super::models::{Identity, IdentityPatch, NewIdentity};
use super::{Created, DeleteSummary, StoreError, WriteSummary, LIST_LIMIT};

const COLUMNS: &str = "id, name, description, user_id, habits, created_at";

pub async fn create(pool: &PgPool, owner_id: Uuid, new: NewIdentity) -> Result<Created, StoreError> {
    let inserted_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO identities (name, description, user_id, habits) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&new.name)
    .bind(&new.description)
    .bind(owner_id)
    .bind(&new.habits)
    .fetch_one(pool)
    .await?;

    Ok(Created { inserted_id })
}

pub async fn get_one(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<Option<Identity>, StoreError> {
    let sql = format!("SELECT {COLUMNS} FROM identities WHERE id = $1 AND user_id = $2");

    let identity = sqlx::query_as::<_, Identity>(&sql)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

    Ok(identity)
}

pub async fn list(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Identity>, StoreError> {
    let sql = format!("SELECT {COLUMNS} FROM identities WHERE user_id = $1 LIMIT $2");

    let identities = sqlx::query_as::<_, Identity>(&sql)
        .bind(owner_id)
        .bind(LIST_LIMIT)
        .fetch_all(pool)
        .await?;

    Ok(identities)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    owner_id: Uuid,
    patch: IdentityPatch,
) -> Result<WriteSummary, StoreError> {
    let result = sqlx::query(
        "UPDATE identities SET name = $1, description = $2, habits = $3 WHERE id = $4 AND user_id = $5",
    )
    .bind(&patch.name)
    .bind(&patch.description)
    .bind(&patch.habits)
    .bind(id)
    .bind(owner_id)
    .execute(pool)
    .await?;

    Ok(WriteSummary {
        matched_count: result.rows_affected(),
        modified_count: result.rows_affected(),
    })
}

pub async fn delete(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<DeleteSummary, StoreError> {
    let result = sqlx::query("DELETE FROM identities WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    Ok(DeleteSummary {
        deleted_count: result.rows_affected(),
    })
}
