//! Great-circle distance on the WGS-84 ellipsoid and the nearby-ratings
//! filter built on top of it.

use serde::{Deserialize, Serialize};

use crate::models::rating::Rating;

const WGS84_A: f64 = 6_378_137.0;
const WGS84_F: f64 = 1.0 / 298.257_223_563;
const MEAN_EARTH_RADIUS_KM: f64 = 6_371.008_8;

const MAX_ITERATIONS: usize = 200;
const CONVERGENCE: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Geodesic distance in kilometres between two points.
///
/// Uses Vincenty's inverse formula on the WGS-84 ellipsoid. The iteration
/// does not converge for some nearly antipodal pairs; those fall back to the
/// spherical haversine distance, which is within 0.5% of the true value.
pub fn geodesic_km(from: GeoPoint, to: GeoPoint) -> f64 {
    vincenty_km(from, to).unwrap_or_else(|| haversine_km(from, to))
}

fn vincenty_km(from: GeoPoint, to: GeoPoint) -> Option<f64> {
    if from == to {
        return Some(0.0);
    }

    let a = WGS84_A;
    let f = WGS84_F;
    let b = (1.0 - f) * a;

    let l = (to.longitude - from.longitude).to_radians();
    let u1 = ((1.0 - f) * from.latitude.to_radians().tan()).atan();
    let u2 = ((1.0 - f) * to.latitude.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    for _ in 0..MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();

        // Antipodal on a meridian; the formula degenerates.
        if sin_sigma == 0.0 {
            return None;
        }

        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

        // Both points on the equator.
        let cos_2sigma_m = if cos_sq_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            0.0
        };

        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

        if (lambda - previous).abs() < CONVERGENCE {
            let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
            let big_a =
                1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
            let delta_sigma = big_b
                * sin_sigma
                * (cos_2sigma_m
                    + big_b / 4.0
                        * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                            - big_b / 6.0
                                * cos_2sigma_m
                                * (-3.0 + 4.0 * sin_sigma.powi(2))
                                * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));

            return Some(b * big_a * (sigma - delta_sigma) / 1000.0);
        }
    }

    None
}

fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);

    2.0 * MEAN_EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Ratings that carry a location within `radius_km` of `origin`, boundary
/// included. Input order is preserved.
pub fn nearby_ratings<'a>(
    origin: GeoPoint,
    radius_km: f64,
    candidates: &'a [Rating],
) -> Vec<&'a Rating> {
    candidates
        .iter()
        .filter(|rating| {
            rating
                .location()
                .is_some_and(|point| geodesic_km(origin, point) <= radius_km)
        })
        .collect()
}

/// Same as [`nearby_ratings`] when an origin is known. Without one nothing
/// is filtered out.
pub fn filter_nearby<'a>(
    origin: Option<GeoPoint>,
    radius_km: f64,
    candidates: &'a [Rating],
) -> Vec<&'a Rating> {
    match origin {
        Some(origin) => nearby_ratings(origin, radius_km, candidates),
        None => candidates.iter().collect(),
    }
}
