use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{
    models::{network::Network, rating::RatingView},
    stats::grade::Grade,
};

/// Counts of ratings whose value is exactly 1, 2, 3, 4 or 5.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingDistribution(pub [u64; 5]);

impl RatingDistribution {
    pub fn bucket(&self, stars: usize) -> u64 {
        match stars {
            1..=5 => self.0[stars - 1],
            _ => 0,
        }
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }
}

impl Serialize for RatingDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        for (i, count) in self.0.iter().enumerate() {
            map.serialize_entry(&(i + 1).to_string(), count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    pub average_rating: f64,
    pub total_count: u64,
    pub distribution: RatingDistribution,
    pub recent_average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub total_ratings: u64,
    pub average_given: f64,
    pub distinct_networks_rated: u64,
    pub recent_activity: u64,
    pub favorite_rating_value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    NoData,
    Stable,
    Improving,
    Declining,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkTrend {
    pub trend: Trend,
    pub change: f64,
    pub first_half_avg: f64,
    pub second_half_avg: f64,
    pub count_in_window: u64,
    pub window_days: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub network: Network,
    pub average_rating: f64,
    pub review_count: u64,
    pub sample_reviews: Vec<RatingView>,
    pub grade: Grade,
}
