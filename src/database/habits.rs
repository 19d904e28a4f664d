//! Owner-scoped queries for the habits collection.

use sqlx::PgPool;
use uuid::Uuid;

use super::models::{Habit, HabitPatch, NewHabit};
use super::{Created, DeleteSummary, StoreError, WriteSummary, LIST_LIMIT};

const COLUMNS: &str = "id, name, description, user_id, identity, created_at";

pub async fn create(pool: &PgPool, owner_id: Uuid, new: NewHabit) -> Result<Created, StoreError> {
    let inserted_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO habits (name, description, user_id, identity) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&new.name)
    .bind(&new.description)
    .bind(owner_id)
    .bind(new.identity)
    .fetch_one(pool)
    .await?;

    Ok(Created { inserted_id })
}

pub async fn get_one(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<Option<Habit>, StoreError> {
    let sql = format!("SELECT {COLUMNS} FROM habits WHERE id = $1 AND user_id = $2");

    let habit = sqlx::query_as::<_, Habit>(&sql)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

    Ok(habit)
}

pub async fn list(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Habit>, StoreError> {
    let sql = format!("SELECT {COLUMNS} FROM habits WHERE user_id = $1 LIMIT $2");

    let habits = sqlx::query_as::<_, Habit>(&sql)
        .bind(owner_id)
        .bind(LIST_LIMIT)
        .fetch_all(pool)
        .await?;

    Ok(habits)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    owner_id: Uuid,
    patch: HabitPatch,
) -> Result<WriteSummary, StoreError> {
    let result = sqlx::query(
        "UPDATE habits SET name = $1, description = $2, identity = $3 WHERE id = $4 AND user_id = $5",
    )
    .bind(&patch.name)
    .bind(&patch.description)
    .bind(patch.identity)
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
    let result = sqlx::query("DELETE FROM habits WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    Ok(DeleteSummary {
        deleted_count: result.rows_affected(),
    })
}
