use sqlx::PgPool;

use crate::errors::AppError;

/// Comments on the rating go with it.
pub async fn delete_rating(rating_id: i64, postgres: PgPool) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM ratings WHERE id = $1")
        .bind(rating_id)
        .execute(&postgres)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to delete rating: {}", e)))?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Rating not found".into()));
    }

    tracing::info!("Deleted rating {}", rating_id);

    Ok(())
}
