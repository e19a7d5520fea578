use sqlx::PgPool;

use crate::{
    errors::AppError,
    models::device::{Device, NewDevice},
};

pub async fn create_device(device: NewDevice, postgres: PgPool) -> Result<Device, AppError> {
    let created = sqlx::query_as::<_, Device>(
        "INSERT INTO devices (name, slug) VALUES ($1, $2) RETURNING id, name, slug",
    )
    .bind(&device.name)
    .bind(&device.slug)
    .fetch_one(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to create device: {}", e)))?;

    tracing::info!("Created device: {} (ID: {})", created.name, created.id);

    Ok(created)
}
