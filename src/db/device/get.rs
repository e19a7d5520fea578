use sqlx::PgPool;

use crate::{errors::AppError, models::device::Device};

pub async fn list_devices(postgres: PgPool) -> Result<Vec<Device>, AppError> {
    let devices =
        sqlx::query_as::<_, Device>("SELECT id, name, slug FROM devices ORDER BY name ASC")
            .fetch_all(&postgres)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to list devices: {}", e)))?;

    Ok(devices)
}

pub async fn get_device_by_id(
    device_id: i64,
    postgres: PgPool,
) -> Result<Option<Device>, AppError> {
    let device = sqlx::query_as::<_, Device>("SELECT id, name, slug FROM devices WHERE id = $1")
        .bind(device_id)
        .fetch_optional(&postgres)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch device: {}", e)))?;

    Ok(device)
}
