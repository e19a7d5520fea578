use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;

/// Adds the user's like if absent, removes it otherwise. Returns whether the
/// comment is now liked and its like total.
pub async fn toggle_like(
    comment_id: i64,
    user_id: Uuid,
    postgres: PgPool,
) -> Result<(bool, u64), AppError> {
    let mut tx = postgres
        .begin()
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to start transaction: {}", e)))?;

    let removed = sqlx::query("DELETE FROM comment_likes WHERE comment_id = $1 AND user_id = $2")
        .bind(comment_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to remove like: {}", e)))?
        .rows_affected();

    let liked = removed == 0;
    if liked {
        sqlx::query(
            "INSERT INTO comment_likes (comment_id, user_id) VALUES ($1, $2)
            ON CONFLICT DO NOTHING",
        )
        .bind(comment_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to add like: {}", e)))?;
    }

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comment_likes WHERE comment_id = $1")
        .bind(comment_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to count likes: {}", e)))?;

    tx.commit()
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to commit like: {}", e)))?;

    tracing::debug!("User {} liked={} comment {}", user_id, liked, comment_id);

    Ok((liked, total.max(0) as u64))
}
