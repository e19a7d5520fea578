use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;

use crate::{
    auth::AuthClaims,
    db::{
        device::get::get_device_by_id,
        network::get::get_network_by_id,
        rating::{
            delete::delete_rating,
            get::{get_rating_by_id, list_ratings},
            post::create_rating,
            put::update_rating,
        },
    },
    errors::AppError,
    geolocate::ClientIp,
    http::handlers::{parse_radius, resolve_origin},
    models::rating::{
        NewRatingPayload, Rating, RatingChangesPayload, RatingFilter, RatingListQuery, RatingView,
    },
    state::AppState,
    stats::geo::filter_nearby,
};

const DEFAULT_LIST_RADIUS_KM: f64 = 5.0;

pub async fn list_ratings_handler(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Query(query): Query<RatingListQuery>,
) -> Result<Json<Vec<RatingView>>, (StatusCode, String)> {
    let radius = parse_radius(query.radius, DEFAULT_LIST_RADIUS_KM).map_err(|e| e.to_response())?;
    let min_rating = query
        .min_rating
        .map(|m| {
            Decimal::try_from(m)
                .map_err(|_| AppError::BadRequest("min_rating must be a number".into()))
        })
        .transpose()
        .map_err(|e| e.to_response())?;

    let filter = RatingFilter {
        network_id: query.network_id,
        device_id: query.device_id,
        min_rating,
        search: query.search,
    };

    let ratings = list_ratings(&filter, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error listing ratings: {}", e);
            e.to_response()
        })?;

    let origin = if query.nearby.unwrap_or(true) {
        resolve_origin(&state, query.lat, query.lon, ip.as_deref())
            .await
            .map_err(|e| e.to_response())?
            .map(|(point, _)| point)
    } else {
        None
    };

    if origin.is_none() {
        tracing::debug!("No origin for nearby filtering, returning unfiltered ratings");
    }

    Ok(Json(
        filter_nearby(origin, radius, &ratings)
            .into_iter()
            .map(RatingView::from)
            .collect(),
    ))
}

pub async fn create_rating_handler(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    ClientIp(ip): ClientIp,
    Json(payload): Json<NewRatingPayload>,
) -> Result<(StatusCode, Json<RatingView>), (StatusCode, String)> {
    let user_id = claims.user_id().map_err(|e| e.to_response())?;
    let mut rating = payload.validate().map_err(|e| e.to_response())?;

    ensure_references(&state, rating.network_id, rating.device_id)
        .await
        .map_err(|e| e.to_response())?;

    if rating.location.is_none() {
        if let Some(location) = state.locator.locate(ip.as_deref()).await {
            rating.enrich(&location.place, location.point);
        }
    }

    let created = create_rating(user_id, rating, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error creating rating: {}", e);
            e.to_response()
        })?;

    Ok((StatusCode::CREATED, Json(RatingView::from(&created))))
}

pub async fn get_rating_handler(
    State(state): State<AppState>,
    Path(rating_id): Path<i64>,
) -> Result<Json<RatingView>, (StatusCode, String)> {
    let rating = find_rating(&state, rating_id)
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(RatingView::from(&rating)))
}

pub async fn update_rating_handler(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path(rating_id): Path<i64>,
    Json(payload): Json<RatingChangesPayload>,
) -> Result<Json<RatingView>, (StatusCode, String)> {
    let mut rating = find_rating(&state, rating_id)
        .await
        .map_err(|e| e.to_response())?;

    if !claims.can_modify(rating.user_id) {
        return Err(
            AppError::Forbidden("You don't have permission to edit this rating".into())
                .to_response(),
        );
    }

    let changes = payload.validate().map_err(|e| e.to_response())?;
    ensure_references(&state, changes.network_id, changes.device_id)
        .await
        .map_err(|e| e.to_response())?;

    changes.apply(&mut rating);

    let updated = update_rating(&rating, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error updating rating {}: {}", rating_id, e);
            e.to_response()
        })?;

    Ok(Json(RatingView::from(&updated)))
}

pub async fn delete_rating_handler(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path(rating_id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let rating = find_rating(&state, rating_id)
        .await
        .map_err(|e| e.to_response())?;

    if !claims.can_modify(rating.user_id) {
        return Err(
            AppError::Forbidden("You don't have permission to delete this rating".into())
                .to_response(),
        );
    }

    delete_rating(rating_id, state.postgres.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error deleting rating {}: {}", rating_id, e);
            e.to_response()
        })?;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_rating(state: &AppState, rating_id: i64) -> Result<Rating, AppError> {
    get_rating_by_id(rating_id, state.postgres.clone())
        .await?
        .ok_or_else(|| AppError::NotFound("Rating not found".into()))
}

async fn ensure_references(
    state: &AppState,
    network_id: Option<i64>,
    device_id: Option<i64>,
) -> Result<(), AppError> {
    if let Some(network_id) = network_id {
        if get_network_by_id(network_id, state.postgres.clone())
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(format!(
                "Network {} does not exist",
                network_id
            )));
        }
    }

    if let Some(device_id) = device_id {
        if get_device_by_id(device_id, state.postgres.clone())
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(format!(
                "Device {} does not exist",
                device_id
            )));
        }
    }

    Ok(())
}
