use sqlx::PgPool;

use crate::{errors::AppError, models::rating::Rating};

/// Writes every mutable column of `rating` back.
pub async fn update_rating(rating: &Rating, postgres: PgPool) -> Result<Rating, AppError> {
    let updated = sqlx::query_as::<_, Rating>(
        "UPDATE ratings
        SET network_id = $2, device_id = $3, value = $4, latitude = $5, longitude = $6,
            address = $7, review = $8
        WHERE id = $1
        RETURNING id, user_id, network_id, device_id, value, latitude, longitude, address, review, created_at",
    )
    .bind(rating.id)
    .bind(rating.network_id)
    .bind(rating.device_id)
    .bind(rating.value)
    .bind(rating.latitude)
    .bind(rating.longitude)
    .bind(&rating.address)
    .bind(&rating.review)
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to update rating: {}", e)))?
    .ok_or_else(|| AppError::NotFound("Rating not found".into()))?;

    Ok(updated)
}
