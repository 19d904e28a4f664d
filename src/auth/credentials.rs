//! Credential store adapter: password hashing/verification and user lookup.

use sqlx::PgPool;

use crate::database::models::User;
use crate::database::StoreError;

const USER_COLUMNS: &str = "id, username, firstname, lastname, password, created_at";

/// Salted bcrypt hash; the plaintext never persists past this call.
pub fn hash_password(plaintext: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(plaintext, bcrypt::DEFAULT_COST)
}

/// Constant-time comparison against the stored hash.
pub fn verify_password(plaintext: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(plaintext, hash)
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, StoreError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");

    let user = sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn insert_user(
    pool: &PgPool,
    username: &str,
    firstname: &str,
    lastname: &str,
    password_hash: &str,
) -> Result<User, StoreError> {
    let sql = format!(
        "INSERT INTO users (username, firstname, lastname, password) VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
    );

    let user = sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .bind(firstname)
        .bind(lastname)
        .bind(password_hash)
        .fetch_one(pool)
        .await?;

    Ok(user)
}
