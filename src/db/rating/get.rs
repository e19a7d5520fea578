use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::RATING_COLUMNS;
use crate::{
    db::contains_pattern,
    errors::AppError,
    models::rating::{Rating, RatingFilter},
};

pub async fn get_rating_by_id(
    rating_id: i64,
    postgres: PgPool,
) -> Result<Option<Rating>, AppError> {
    let rating = sqlx::query_as::<_, Rating>(&format!(
        "SELECT {RATING_COLUMNS} FROM ratings r WHERE r.id = $1"
    ))
    .bind(rating_id)
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch rating: {}", e)))?;

    Ok(rating)
}

/// Ratings matching `filter`, newest first.
pub async fn list_ratings(
    filter: &RatingFilter,
    postgres: PgPool,
) -> Result<Vec<Rating>, AppError> {
    let mut query = QueryBuilder::<Postgres>::new(format!(
        "SELECT {RATING_COLUMNS} FROM ratings r
			LEFT JOIN networks n ON n.id = r.network_id
			WHERE TRUE"
    ));

    if let Some(network_id) = filter.network_id {
        query.push(" AND r.network_id = ").push_bind(network_id);
    }
    if let Some(device_id) = filter.device_id {
        query.push(" AND r.device_id = ").push_bind(device_id);
    }
    if let Some(min_rating) = filter.min_rating {
        query.push(" AND r.value >= ").push_bind(min_rating);
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = contains_pattern(search);
        query
            .push(" AND (r.review ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR n.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR r.address ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    query.push(" ORDER BY r.created_at DESC, r.id DESC");

    let ratings = query
        .build_query_as::<Rating>()
        .fetch_all(&postgres)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list ratings: {}", e)))?;

    tracing::debug!("Listed {} ratings for {:?}", ratings.len(), filter);

    Ok(ratings)
}

pub async fn get_ratings_by_network(
    network_id: i64,
    since: Option<DateTime<Utc>>,
    postgres: PgPool,
) -> Result<Vec<Rating>, AppError> {
    let ratings = sqlx::query_as::<_, Rating>(&format!(
        "SELECT {RATING_COLUMNS} FROM ratings r
			WHERE r.network_id = $1 AND ($2::timestamptz IS NULL OR r.created_at >= $2)
			ORDER BY r.created_at ASC, r.id ASC"
    ))
    .bind(network_id)
    .bind(since)
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch network ratings: {}", e)))?;

    Ok(ratings)
}

pub async fn get_recent_ratings_by_network(
    network_id: i64,
    limit: i64,
    postgres: PgPool,
) -> Result<Vec<Rating>, AppError> {
    let ratings = sqlx::query_as::<_, Rating>(&format!(
        "SELECT {RATING_COLUMNS} FROM ratings r
			WHERE r.network_id = $1
			ORDER BY r.created_at DESC, r.id DESC
			LIMIT $2"
    ))
    .bind(network_id)
    .bind(limit)
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch recent ratings: {}", e)))?;

    Ok(ratings)
}

pub async fn get_ratings_by_user(user_id: Uuid, postgres: PgPool) -> Result<Vec<Rating>, AppError> {
    let ratings = sqlx::query_as::<_, Rating>(&format!(
        "SELECT {RATING_COLUMNS} FROM ratings r
			WHERE r.user_id = $1
			ORDER BY r.created_at ASC, r.id ASC"
    ))
    .bind(user_id)
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch user ratings: {}", e)))?;

    Ok(ratings)
}

/// Located ratings, lowest value first.
pub async fn get_located_ratings(postgres: PgPool) -> Result<Vec<Rating>, AppError> {
    let ratings = sqlx::query_as::<_, Rating>(&format!(
        "SELECT {RATING_COLUMNS} FROM ratings r
			WHERE r.latitude IS NOT NULL AND r.longitude IS NOT NULL
			ORDER BY r.value ASC, r.id ASC"
    ))
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch located ratings: {}", e)))?;

    Ok(ratings)
}
