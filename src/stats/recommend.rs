use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::{
    models::rating::Rating,
    stats::{
        aggregate::{mean, round2, to_f64},
        geo::{GeoPoint, nearby_ratings},
    },
};

pub const MAX_SAMPLE_REVIEWS: usize = 3;
pub const MAX_RECOMMENDATIONS: usize = 10;

/// One network's standing among the ratings near a point.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedNetwork<'a> {
    pub network_id: i64,
    pub average_rating: f64,
    pub review_count: u64,
    pub sample_reviews: Vec<&'a Rating>,
}

/// Ranks networks by the average of their ratings within `radius_km` of
/// `origin`. Networks with fewer than `min_reviews` nearby ratings are left
/// out; ties keep the order in which networks were first seen.
pub fn rank_nearby<'a>(
    origin: GeoPoint,
    radius_km: f64,
    min_reviews: usize,
    candidates: &'a [Rating],
) -> Vec<RankedNetwork<'a>> {
    let mut groups: Vec<(i64, Vec<&'a Rating>)> = Vec::new();
    let mut slots: HashMap<i64, usize> = HashMap::new();

    for rating in nearby_ratings(origin, radius_km, candidates) {
        let Some(network_id) = rating.network_id else {
            continue;
        };

        let slot = *slots.entry(network_id).or_insert_with(|| {
            groups.push((network_id, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(rating);
    }

    let mut ranked: Vec<(Decimal, RankedNetwork<'a>)> = groups
        .into_iter()
        .filter(|(_, ratings)| ratings.len() >= min_reviews)
        .filter_map(|(network_id, ratings)| {
            let average = mean(ratings.iter().copied())?;
            Some((
                average,
                RankedNetwork {
                    network_id,
                    average_rating: to_f64(round2(average)),
                    review_count: ratings.len() as u64,
                    sample_reviews: ratings.into_iter().take(MAX_SAMPLE_REVIEWS).collect(),
                },
            ))
        })
        .collect();

    ranked.sort_by(|(a, _), (b, _)| b.cmp(a));
    ranked.truncate(MAX_RECOMMENDATIONS);

    ranked.into_iter().map(|(_, network)| network).collect()
}
