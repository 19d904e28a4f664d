//! Owner-scoped queries for the logs collection, including the habit join.

use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::models::{Habit, Log, LogPatch, LogWithHabits, NewLog};
use super::{Created, DeleteSummary, StoreError, WriteSummary, LIST_LIMIT};

/// Single composed query: match the log rows, then left-join the habit
/// records their id sets point at, aggregated into one JSON array per log.
/// Dangling habit ids fall out of the join; there is no per-id fetch loop.
const JOINED_SELECT: &str = r#"
    SELECT l.id, l.entry, l.user_id, l.habits, l.created_at,
           COALESCE(json_agg(h) FILTER (WHERE h.id IS NOT NULL), '[]'::json) AS habits_info
    FROM logs l
    LEFT JOIN habits h ON h.id = ANY(l.habits)
"#;

pub async fn create(pool: &PgPool, owner_id: Uuid, new: NewLog) -> Result<Created, StoreError> {
    let inserted_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO logs (entry, user_id, habits) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&new.entry)
    .bind(owner_id)
    .bind(&new.habits)
    .fetch_one(pool)
    .await?;

    Ok(Created { inserted_id })
}

/// Fetch by id and owner in the same query: a record owned by someone else
/// is indistinguishable from a missing one.
pub async fn get_one(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<Option<LogWithHabits>, StoreError> {
    let sql = format!("{JOINED_SELECT} WHERE l.id = $1 AND l.user_id = $2 GROUP BY l.id");

    sqlx::query(&sql)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?
        .map(decode_joined_row)
        .transpose()
}

pub async fn list(pool: &PgPool, owner_id: Uuid) -> Result<Vec<LogWithHabits>, StoreError> {
    let sql = format!("{JOINED_SELECT} WHERE l.user_id = $1 GROUP BY l.id LIMIT $2");

    sqlx::query(&sql)
        .bind(owner_id)
        .bind(LIST_LIMIT)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(decode_joined_row)
        .collect()
}

/// Wholesale replace of the mutable fields. The ownership guard has already
/// passed; the owner qualifier is kept in the filter anyway.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    owner_id: Uuid,
    patch: LogPatch,
) -> Result<WriteSummary, StoreError> {
    let result = sqlx::query("UPDATE logs SET entry = $1, habits = $2 WHERE id = $3 AND user_id = $4")
        .bind(&patch.entry)
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
    let result = sqlx::query("DELETE FROM logs WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    Ok(DeleteSummary {
        deleted_count: result.rows_affected(),
    })
}

fn decode_joined_row(row: PgRow) -> Result<LogWithHabits, StoreError> {
    let log = Log {
        id: row.try_get("id")?,
        entry: row.try_get("entry")?,
        user_id: row.try_get("user_id")?,
        habits: row.try_get("habits")?,
        created_at: row.try_get("created_at")?,
    };
    let Json(habits_info): Json<Vec<Habit>> = row.try_get("habits_info")?;

    Ok(LogWithHabits { log, habits_info })
}
