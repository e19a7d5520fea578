use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::{
        RatingLookup, network::get::get_network_overviews,
        rating::get::get_recent_ratings_by_network,
    },
    errors::AppError,
    geolocate::ClientIp,
    http::handlers::{parse_radius, resolve_origin},
    models::{
        network::{NetworkHeader, NetworkOverview},
        rating::RatingView,
        stats::{NetworkStats, NetworkTrend, Recommendation, UserSummary},
    },
    state::AppState,
    stats::{
        self,
        aggregate::{DEFAULT_TREND_WINDOW_DAYS, round2, to_f64},
        geo::GeoPoint,
        grade::{Grade, grade},
    },
};

const RECENT_REVIEWS: i64 = 5;
const MAX_TREND_WINDOW_DAYS: u32 = 365;
const DEFAULT_RECOMMENDATION_RADIUS_KM: f64 = 10.0;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkOverviewResponse {
    pub networks: Vec<NetworkOverview>,
    pub total_networks: usize,
}

pub async fn network_overview_handler(
    State(state): State<AppState>,
) -> Result<Json<NetworkOverviewResponse>, (StatusCode, String)> {
    let rows = get_network_overviews(state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error fetching network statistics: {}", e);
            e.to_response()
        })?;

    let networks: Vec<NetworkOverview> = rows
        .into_iter()
        .map(|row| {
            let average_rating = row.avg_rating.map(|a| to_f64(round2(a))).unwrap_or(0.0);
            let total_reviews = row.review_count.max(0) as u64;
            NetworkOverview {
                id: row.id,
                name: row.name,
                slug: row.slug,
                active: row.active,
                average_rating,
                total_reviews,
                total_comments: row.total_comments.max(0) as u64,
                grade: grade(average_rating, total_reviews),
            }
        })
        .collect();

    Ok(Json(NetworkOverviewResponse {
        total_networks: networks.len(),
        networks,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDetailResponse {
    pub network: NetworkHeader,
    pub statistics: NetworkStats,
    pub grade: Grade,
    pub recent_reviews: Vec<RatingView>,
}

pub async fn network_detail_handler(
    State(state): State<AppState>,
    Path(network_id): Path<i64>,
) -> Result<Json<NetworkDetailResponse>, (StatusCode, String)> {
    let network = state
        .postgres
        .network_by_id(network_id)
        .await
        .map_err(|e| e.to_response())?
        .ok_or_else(|| AppError::NotFound("Network not found".into()).to_response())?;

    let statistics = stats::network_stats_for(&state.postgres, network_id, Utc::now())
        .await
        .map_err(|e| {
            tracing::error!("Error computing stats for network {}: {}", network_id, e);
            e.to_response()
        })?;

    let recent = get_recent_ratings_by_network(network_id, RECENT_REVIEWS, state.postgres.clone())
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(NetworkDetailResponse {
        network: NetworkHeader::from(&network),
        grade: grade(statistics.average_rating, statistics.total_count),
        statistics,
        recent_reviews: recent.iter().map(RatingView::from).collect(),
    }))
}

#[derive(Deserialize)]
pub struct TrendQuery {
    pub window_days: Option<u32>,
}

pub async fn network_trend_handler(
    State(state): State<AppState>,
    Path(network_id): Path<i64>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<NetworkTrend>, (StatusCode, String)> {
    let window_days = query.window_days.unwrap_or(DEFAULT_TREND_WINDOW_DAYS);
    if !(1..=MAX_TREND_WINDOW_DAYS).contains(&window_days) {
        return Err(AppError::BadRequest(format!(
            "window_days must be between 1 and {}",
            MAX_TREND_WINDOW_DAYS
        ))
        .to_response());
    }

    state
        .postgres
        .network_by_id(network_id)
        .await
        .map_err(|e| e.to_response())?
        .ok_or_else(|| AppError::NotFound("Network not found".into()).to_response())?;

    let trend = stats::network_trend_for(&state.postgres, network_id, window_days, Utc::now())
        .await
        .map_err(|e| {
            tracing::error!("Error computing trend for network {}: {}", network_id, e);
            e.to_response()
        })?;

    Ok(Json(trend))
}

pub async fn user_summary_handler(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserSummary>, (StatusCode, String)> {
    let summary = stats::user_summary_for(&state.postgres, user_id, Utc::now())
        .await
        .map_err(|e| {
            tracing::error!("Error computing summary for user {}: {}", user_id, e);
            e.to_response()
        })?;

    Ok(Json(summary))
}

#[derive(Deserialize)]
pub struct RecommendationQuery {
    pub radius: Option<f64>,
    pub min_reviews: Option<usize>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationLocation {
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub location: RecommendationLocation,
    pub search_radius_km: f64,
    pub recommendations: Vec<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub async fn recommendations_handler(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<RecommendationResponse>, (StatusCode, String)> {
    let radius = parse_radius(query.radius, DEFAULT_RECOMMENDATION_RADIUS_KM)
        .map_err(|e| e.to_response())?;
    let min_reviews = query.min_reviews.unwrap_or(1);
    if min_reviews == 0 {
        return Err(AppError::BadRequest("min_reviews must be at least 1".into()).to_response());
    }

    let (origin, address): (GeoPoint, Option<String>) =
        resolve_origin(&state, query.lat, query.lon, ip.as_deref())
            .await
            .map_err(|e| e.to_response())?
            .ok_or_else(|| {
                AppError::BadRequest("Could not determine your location".into()).to_response()
            })?;

    let recommendations = stats::rank_nearby_for(&state.postgres, origin, radius, min_reviews)
        .await
        .map_err(|e| {
            tracing::error!("Error generating recommendations: {}", e);
            e.to_response()
        })?;

    let message = recommendations
        .is_empty()
        .then(|| format!("No ratings found within {}km of your location", radius));

    Ok(Json(RecommendationResponse {
        location: RecommendationLocation {
            address,
            latitude: origin.latitude,
            longitude: origin.longitude,
        },
        search_radius_km: radius,
        recommendations,
        message,
    }))
}
