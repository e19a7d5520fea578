use sqlx::PgPool;

use crate::{errors::AppError, models::comment::Comment};

pub async fn update_comment_content(
    comment_id: i64,
    content: String,
    postgres: PgPool,
) -> Result<Comment, AppError> {
    sqlx::query_as::<_, Comment>(
        "UPDATE comments SET content = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING id, user_id, content, rating_id, parent_id, created_at, updated_at",
    )
    .bind(comment_id)
    .bind(content)
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to update comment: {}", e)))?
    .ok_or_else(|| AppError::NotFound("Comment not found".into()))
}
