mod common;

use common::{located_rating, rating};
use radeur_be::stats::{GeoPoint, filter_nearby, geodesic_km, nearby_ratings};

fn ids(ratings: &[&radeur_be::models::Rating]) -> Vec<i64> {
    ratings.iter().map(|r| r.id).collect()
}

#[test]
fn test_geodesic_flinders_peak_to_buninyong() {
    let flinders_peak = GeoPoint::new(-37.951_033_416_7, 144.424_867_888_9);
    let buninyong = GeoPoint::new(-37.652_821_138_9, 143.926_495_527_8);

    let distance = geodesic_km(flinders_peak, buninyong);
    assert!(
        (distance - 54.972_271).abs() < 1e-3,
        "unexpected distance {distance}"
    );
}

#[test]
fn test_geodesic_newport_to_cleveland() {
    let newport = GeoPoint::new(41.490_08, -71.312_796);
    let cleveland = GeoPoint::new(41.499_498, -81.695_391);

    let distance = geodesic_km(newport, cleveland);
    assert!((distance - 866.455).abs() < 1e-2, "unexpected distance {distance}");
}

#[test]
fn test_geodesic_is_symmetric_and_zero_for_same_point() {
    let lagos = GeoPoint::new(6.524_379, 3.379_206);
    let abuja = GeoPoint::new(9.076_479, 7.398_574);

    assert_eq!(geodesic_km(lagos, lagos), 0.0);
    assert!((geodesic_km(lagos, abuja) - geodesic_km(abuja, lagos)).abs() < 1e-6);
}

#[test]
fn test_geodesic_nearly_antipodal_falls_back() {
    let a = GeoPoint::new(0.0, 0.0);
    let b = GeoPoint::new(0.5, 179.7);

    let distance = geodesic_km(a, b);
    assert!(distance.is_finite());
    assert!(distance > 19_000.0 && distance < 20_100.0);
}

#[test]
fn test_nearby_ratings_boundary_is_inclusive() {
    let origin = GeoPoint::new(6.524_379, 3.379_206);
    let edge = GeoPoint::new(6.560_000, 3.400_000);
    let radius = geodesic_km(origin, edge);

    let candidates = vec![located_rating(1, Some(1), 40, edge.latitude, edge.longitude)];

    assert_eq!(ids(&nearby_ratings(origin, radius, &candidates)), vec![1]);
    assert!(nearby_ratings(origin, radius - 1e-6, &candidates).is_empty());
}

#[test]
fn test_nearby_ratings_skips_unlocated_and_keeps_order() {
    let origin = GeoPoint::new(6.524_379, 3.379_206);
    let candidates = vec![
        located_rating(1, Some(1), 40, 6.53, 3.38),
        rating(2, Some(1), 50),
        located_rating(3, Some(2), 30, 9.076_479, 7.398_574),
        located_rating(4, Some(2), 20, 6.52, 3.37),
    ];

    let nearby = nearby_ratings(origin, 5.0, &candidates);
    assert_eq!(ids(&nearby), vec![1, 4]);
}

#[test]
fn test_nearby_ratings_is_idempotent() {
    let origin = GeoPoint::new(6.524_379, 3.379_206);
    let candidates = vec![
        located_rating(1, Some(1), 40, 6.53, 3.38),
        located_rating(2, Some(1), 50, 6.60, 3.50),
        located_rating(3, Some(2), 30, 6.52, 3.37),
    ];

    let first: Vec<_> = nearby_ratings(origin, 5.0, &candidates)
        .into_iter()
        .cloned()
        .collect();
    let second = nearby_ratings(origin, 5.0, &first);

    assert_eq!(ids(&second), first.iter().map(|r| r.id).collect::<Vec<_>>());
    assert_eq!(
        ids(&nearby_ratings(origin, 5.0, &candidates)),
        ids(&nearby_ratings(origin, 5.0, &candidates))
    );
}

#[test]
fn test_filter_nearby_without_origin_keeps_everything() {
    let candidates = vec![rating(1, Some(1), 40), located_rating(2, Some(1), 30, 1.0, 1.0)];

    assert_eq!(ids(&filter_nearby(None, 5.0, &candidates)), vec![1, 2]);
    assert!(filter_nearby(Some(GeoPoint::new(50.0, 50.0)), 5.0, &candidates).is_empty());
}
