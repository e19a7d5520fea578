use sqlx::PgPool;

use crate::{
    errors::AppError,
    models::network::{NewNetwork, Network},
};

pub async fn create_network(network: NewNetwork, postgres: PgPool) -> Result<Network, AppError> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM networks WHERE slug = $1")
        .bind(&network.slug)
        .fetch_optional(&postgres)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to query network: {}", e)))?;

    if existing.is_some() {
        return Err(duplicate_slug(&network.slug));
    }

    let created = sqlx::query_as::<_, Network>(
        "INSERT INTO networks (name, image, active, slug)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, image, active, slug",
    )
    .bind(&network.name)
    .bind(&network.image)
    .bind(network.active)
    .bind(&network.slug)
    .fetch_one(&postgres)
    .await
    .map_err(|e| insert_error(&network.slug, e))?;

    tracing::info!("Created network: {} (ID: {})", created.name, created.id);

    Ok(created)
}

fn duplicate_slug(slug: &str) -> AppError {
    AppError::BadRequest(format!("Network with slug '{}' already exists", slug))
}

/// A concurrent insert can still win the slug after the check above.
fn insert_error(slug: &str, err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => duplicate_slug(slug),
        _ => AppError::DatabaseError(format!("Failed to create network: {}", err)),
    }
}
