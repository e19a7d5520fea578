//! Rating statistics: aggregation, trends, grading and location-based
//! recommendations. Everything below `aggregate`, `geo`, `grade` and
//! `recommend` is pure; the functions here fetch a snapshot through a
//! [`RatingLookup`] and hand it over.

pub mod aggregate;
pub mod geo;
pub mod grade;
pub mod recommend;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    db::RatingLookup,
    errors::AppError,
    models::{
        rating::{Rating, RatingView},
        stats::{NetworkStats, NetworkTrend, Recommendation, UserSummary},
    },
    validation,
};

pub use aggregate::{network_stats, network_trend, user_summary};
pub use geo::{GeoPoint, filter_nearby, geodesic_km, nearby_ratings};
pub use grade::{Grade, grade};
pub use recommend::rank_nearby;

/// Rejects snapshots holding values no aggregate can be built from.
fn well_formed(ratings: Vec<Rating>) -> Result<Vec<Rating>, AppError> {
    let min = Decimal::from(validation::MIN_RATING);
    let max = Decimal::from(validation::MAX_RATING);

    if let Some(bad) = ratings.iter().find(|r| r.value < min || r.value > max) {
        return Err(AppError::Computation(format!(
            "rating {} has out-of-range value {}",
            bad.id, bad.value
        )));
    }

    Ok(ratings)
}

pub async fn network_stats_for<L>(
    lookup: &L,
    network_id: i64,
    now: DateTime<Utc>,
) -> Result<NetworkStats, AppError>
where
    L: RatingLookup + ?Sized,
{
    let ratings = well_formed(lookup.ratings_for_network(network_id).await?)?;
    Ok(network_stats(&ratings, now))
}

pub async fn user_summary_for<L>(
    lookup: &L,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<UserSummary, AppError>
where
    L: RatingLookup + ?Sized,
{
    let ratings = well_formed(lookup.ratings_for_user(user_id).await?)?;
    Ok(user_summary(&ratings, now))
}

pub async fn network_trend_for<L>(
    lookup: &L,
    network_id: i64,
    window_days: u32,
    now: DateTime<Utc>,
) -> Result<NetworkTrend, AppError>
where
    L: RatingLookup + ?Sized,
{
    let since = aggregate::window_start(now, window_days);
    let ratings = well_formed(
        lookup
            .ratings_for_network_since(network_id, since)
            .await?,
    )?;

    Ok(network_trend(&ratings, now, window_days))
}

/// Top networks around `origin`, resolved to full network records. A
/// network that disappeared between the two lookups is skipped.
pub async fn rank_nearby_for<L>(
    lookup: &L,
    origin: GeoPoint,
    radius_km: f64,
    min_reviews: usize,
) -> Result<Vec<Recommendation>, AppError>
where
    L: RatingLookup + ?Sized,
{
    let candidates = well_formed(lookup.ratings_with_location().await?)?;
    let ranked = rank_nearby(origin, radius_km, min_reviews, &candidates);
    if ranked.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = ranked.iter().map(|r| r.network_id).collect();
    let mut networks: HashMap<i64, _> = lookup
        .networks_by_ids(&ids)
        .await?
        .into_iter()
        .map(|n| (n.id, n))
        .collect();

    Ok(ranked
        .into_iter()
        .filter_map(|r| {
            let network = networks.remove(&r.network_id)?;
            Some(Recommendation {
                network,
                average_rating: r.average_rating,
                review_count: r.review_count,
                sample_reviews: r.sample_reviews.into_iter().map(RatingView::from).collect(),
                grade: grade(r.average_rating, r.review_count),
            })
        })
        .collect())
}
