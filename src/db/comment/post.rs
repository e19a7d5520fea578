use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::comment::{Comment, NewComment},
};

pub async fn create_comment(
    user_id: Uuid,
    comment: NewComment,
    postgres: PgPool,
) -> Result<Comment, AppError> {
    let created = sqlx::query_as::<_, Comment>(
        "INSERT INTO comments (user_id, content, rating_id, parent_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, content, rating_id, parent_id, created_at, updated_at",
    )
    .bind(user_id)
    .bind(&comment.content)
    .bind(comment.rating_id)
    .bind(comment.parent_id)
    .fetch_one(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to create comment: {}", e)))?;

    tracing::info!("Created comment {} by {}", created.id, user_id);

    Ok(created)
}
