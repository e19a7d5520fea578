pub mod comment;
pub mod network;
pub mod rating;
pub mod statistics;

use crate::{errors::AppError, state::AppState, stats::geo::GeoPoint, validation};

pub use comment::{
    create_comment_handler, list_rating_comments_handler, toggle_like_handler,
    update_comment_handler,
};
pub use network::{
    create_device_handler, create_network_handler, list_devices_handler, list_networks_handler,
};
pub use rating::{
    create_rating_handler, delete_rating_handler, get_rating_handler, list_ratings_handler,
    update_rating_handler,
};
pub use statistics::{
    network_detail_handler, network_overview_handler, network_trend_handler,
    recommendations_handler, user_summary_handler,
};

/// Search radius in kilometres; must be finite and not negative.
pub(crate) fn parse_radius(radius: Option<f64>, default: f64) -> Result<f64, AppError> {
    match radius {
        None => Ok(default),
        Some(r) if r.is_finite() && r >= 0.0 => Ok(r),
        Some(r) => Err(AppError::BadRequest(format!(
            "radius must be a non-negative number of kilometres, got {}",
            r
        ))),
    }
}

/// Origin for location-based queries: explicit coordinates when given,
/// otherwise the caller's geolocated position with its place name.
pub(crate) async fn resolve_origin(
    state: &AppState,
    lat: Option<f64>,
    lon: Option<f64>,
    ip: Option<&str>,
) -> Result<Option<(GeoPoint, Option<String>)>, AppError> {
    if let Some(point) = validation::coordinates(lat, lon).map_err(AppError::BadRequest)? {
        return Ok(Some((point, None)));
    }

    Ok(state
        .locator
        .locate(ip)
        .await
        .map(|location| (location.point, Some(location.place))))
}
