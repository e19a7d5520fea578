use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::rating::{NewRating, Rating},
};

pub async fn create_rating(
    user_id: Uuid,
    rating: NewRating,
    postgres: PgPool,
) -> Result<Rating, AppError> {
    let created = sqlx::query_as::<_, Rating>(
        "INSERT INTO ratings (user_id, network_id, device_id, value, latitude, longitude, address, review)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, user_id, network_id, device_id, value, latitude, longitude, address, review, created_at",
    )
    .bind(user_id)
    .bind(rating.network_id)
    .bind(rating.device_id)
    .bind(rating.value)
    .bind(rating.location.map(|p| p.latitude))
    .bind(rating.location.map(|p| p.longitude))
    .bind(&rating.address)
    .bind(&rating.review)
    .fetch_one(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to create rating: {}", e)))?;

    tracing::info!(
        "Created rating {} by {} for network {:?}",
        created.id,
        user_id,
        created.network_id
    );

    Ok(created)
}
