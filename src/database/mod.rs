use serde::Serialize;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::config::DatabaseConfig;

pub mod habits;
pub mod identities;
pub mod logs;
pub mod models;

/// List queries return at most this many records; no continuation token.
pub const LIST_LIMIT: i64 = 10;

/// Errors from the storage layer. Faults are fatal for the offending
/// request only; startup is the one place a connection error ends the
/// process.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not connect to the database: {0}")]
    Connection(#[source] sqlx::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Write acknowledgment for a create: the store-assigned identifier.
#[derive(Debug, Clone, Serialize)]
pub struct Created {
    pub inserted_id: Uuid,
}

/// Write acknowledgment for an update: matched/modified document counts.
#[derive(Debug, Clone, Serialize)]
pub struct WriteSummary {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Write acknowledgment for a delete.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteSummary {
    pub deleted_count: u64,
}

/// Build the shared connection pool from configuration. Called once at
/// process start; every request clones the pool handle.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(StoreError::Connection)?;

    info!("connected to database");
    Ok(pool)
}

/// Pings the pool to ensure connectivity.
pub async fn health_check(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Create the four collections if they do not exist yet. Cross-references
/// (identity/habit id sets) are plain uuid values with no foreign keys:
/// joins tolerate dangling ids instead of storage enforcing integrity.
pub async fn init_schema(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id uuid PRIMARY KEY DEFAULT gen_random_uuid(),
            username text NOT NULL UNIQUE,
            firstname text NOT NULL,
            lastname text NOT NULL,
            password text NOT NULL,
            created_at timestamptz NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS identities (
            id uuid PRIMARY KEY DEFAULT gen_random_uuid(),
            name text NOT NULL,
            description text NOT NULL DEFAULT '',
            user_id uuid NOT NULL,
            habits uuid[] NOT NULL DEFAULT '{}',
            created_at timestamptz NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS habits (
            id uuid PRIMARY KEY DEFAULT gen_random_uuid(),
            name text NOT NULL,
            description text NOT NULL DEFAULT '',
            user_id uuid NOT NULL,
            identity uuid,
            created_at timestamptz NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS logs (
            id uuid PRIMARY KEY DEFAULT gen_random_uuid(),
            entry text NOT NULL,
            user_id uuid NOT NULL,
            habits uuid[] NOT NULL DEFAULT '{}',
            created_at timestamptz NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("database schema ready");
    Ok(())
}
