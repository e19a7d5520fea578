use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::comment::{Comment, CommentRow},
};

pub async fn get_comment_by_id(
    comment_id: i64,
    postgres: PgPool,
) -> Result<Option<Comment>, AppError> {
    let comment = sqlx::query_as::<_, Comment>(
        "SELECT id, user_id, content, rating_id, parent_id, created_at, updated_at
			FROM comments WHERE id = $1",
    )
    .bind(comment_id)
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch comment: {}", e)))?;

    Ok(comment)
}

/// Comments on a rating, oldest first, with like totals. `is_liked` is
/// relative to `viewer` and false for anonymous callers.
pub async fn get_comments_for_rating(
    rating_id: i64,
    viewer: Option<Uuid>,
    postgres: PgPool,
) -> Result<Vec<CommentRow>, AppError> {
    let rows = sqlx::query_as::<_, CommentRow>(
        "SELECT c.id, c.user_id, c.content, c.rating_id, c.parent_id, c.created_at, c.updated_at,
				COUNT(l.user_id) AS total_likes,
				COALESCE(BOOL_OR(l.user_id = $2), FALSE) AS is_liked
			FROM comments c
			LEFT JOIN comment_likes l ON l.comment_id = c.id
			WHERE c.rating_id = $1
			GROUP BY c.id
			ORDER BY c.created_at ASC, c.id ASC",
    )
    .bind(rating_id)
    .bind(viewer)
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch comments: {}", e)))?;

    Ok(rows)
}
