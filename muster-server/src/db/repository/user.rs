//! User Repository

use super::{RepoError, RepoResult, with_retries};
use shared::models::User;
use sqlx::SqlitePool;

/// Insert a user. The primary key makes this a conditional put: an existing
/// `user_id` fails with [`RepoError::Duplicate`] without touching the row.
pub async fn create(pool: &SqlitePool, user: &User) -> RepoResult<()> {
    let result = with_retries(|| async move {
        sqlx::query("INSERT INTO users (user_id, name, created_at, updated_at) VALUES (?, ?, ?, ?)")
            .bind(&user.user_id)
            .bind(&user.name)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(pool)
            .await?;
        Ok(())
    })
    .await;

    match result {
        Err(RepoError::Duplicate(_)) => Err(RepoError::Duplicate(format!("user {}", user.user_id))),
        other => other,
    }
}

pub async fn find_by_id(pool: &SqlitePool, user_id: &str) -> RepoResult<Option<User>> {
    with_retries(|| async move {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, name, created_at, updated_at FROM users WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(user)
    })
    .await
}
