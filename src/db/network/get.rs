use sqlx::PgPool;

use crate::{
    db::contains_pattern,
    errors::AppError,
    models::network::{Network, NetworkOverviewRow},
};

pub async fn list_networks(
    search: Option<&str>,
    active_only: bool,
    postgres: PgPool,
) -> Result<Vec<Network>, AppError> {
    let pattern = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(contains_pattern);

    let networks = sqlx::query_as::<_, Network>(
        "SELECT id, name, image, active, slug
			FROM networks
			WHERE ($1::text IS NULL OR name ILIKE $1)
			AND (NOT $2 OR active)
			ORDER BY name ASC",
    )
    .bind(pattern)
    .bind(active_only)
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to list networks: {}", e)))?;

    Ok(networks)
}

pub async fn get_network_by_id(
    network_id: i64,
    postgres: PgPool,
) -> Result<Option<Network>, AppError> {
    let network = sqlx::query_as::<_, Network>(
        "SELECT id, name, image, active, slug FROM networks WHERE id = $1",
    )
    .bind(network_id)
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch network: {}", e)))?;

    Ok(network)
}

pub async fn get_networks_by_ids(ids: &[i64], postgres: PgPool) -> Result<Vec<Network>, AppError> {
    let networks = sqlx::query_as::<_, Network>(
        "SELECT id, name, image, active, slug FROM networks WHERE id = ANY($1)",
    )
    .bind(ids)
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch networks: {}", e)))?;

    Ok(networks)
}

/// Average, review count and comment count for every network.
pub async fn get_network_overviews(postgres: PgPool) -> Result<Vec<NetworkOverviewRow>, AppError> {
    let rows = sqlx::query_as::<_, NetworkOverviewRow>(
        "SELECT n.id, n.name, n.slug, n.active,
				AVG(r.value) AS avg_rating,
				COUNT(r.id) AS review_count,
				COALESCE(SUM(rc.comment_count), 0)::BIGINT AS total_comments
			FROM networks n
			LEFT JOIN ratings r ON r.network_id = n.id
			LEFT JOIN (
				SELECT rating_id, COUNT(*) AS comment_count
				FROM comments
				GROUP BY rating_id
			) rc ON rc.rating_id = r.id
			GROUP BY n.id
			ORDER BY n.name ASC",
    )
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch network statistics: {}", e)))?;

    Ok(rows)
}
