use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::models::{
    rating::Rating,
    stats::{NetworkStats, NetworkTrend, RatingDistribution, Trend, UserSummary},
};

pub const RECENT_WINDOW_DAYS: i64 = 30;
pub const USER_ACTIVITY_DAYS: i64 = 7;
pub const DEFAULT_TREND_WINDOW_DAYS: u32 = 30;

/// Half-up rounding to two places.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Arithmetic mean of the rating values, `None` for an empty set.
pub fn mean<'a, I>(ratings: I) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a Rating>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((Decimal::ZERO, 0u64), |(sum, count), r| {
            (sum + r.value, count + 1)
        });

    (count > 0).then(|| sum / Decimal::from(count))
}

/// Rounded mean as reported to clients; 0.0 when there is nothing to average.
pub fn rounded_mean<'a, I>(ratings: I) -> f64
where
    I: IntoIterator<Item = &'a Rating>,
{
    mean(ratings).map(|m| to_f64(round2(m))).unwrap_or(0.0)
}

/// Fractional values such as 3.5 land in no bucket.
pub fn distribution<'a, I>(ratings: I) -> RatingDistribution
where
    I: IntoIterator<Item = &'a Rating>,
{
    let mut buckets = [0u64; 5];
    for rating in ratings {
        if !rating.value.fract().is_zero() {
            continue;
        }
        if let Some(stars @ 1..=5) = rating.value.to_usize() {
            buckets[stars - 1] += 1;
        }
    }

    RatingDistribution(buckets)
}

/// Statistics over every rating of one network.
pub fn network_stats(ratings: &[Rating], now: DateTime<Utc>) -> NetworkStats {
    let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);

    NetworkStats {
        average_rating: rounded_mean(ratings),
        total_count: ratings.len() as u64,
        distribution: distribution(ratings),
        recent_average: rounded_mean(ratings.iter().filter(|r| r.created_at >= cutoff)),
    }
}

/// Summary of every rating one user has given.
pub fn user_summary(ratings: &[Rating], now: DateTime<Utc>) -> UserSummary {
    let cutoff = now - Duration::days(USER_ACTIVITY_DAYS);
    let networks: HashSet<i64> = ratings.iter().filter_map(|r| r.network_id).collect();

    UserSummary {
        total_ratings: ratings.len() as u64,
        average_given: rounded_mean(ratings),
        distinct_networks_rated: networks.len() as u64,
        recent_activity: ratings.iter().filter(|r| r.created_at >= cutoff).count() as u64,
        favorite_rating_value: favorite_value(ratings),
    }
}

/// Most frequent rating value as text. Ties go to whichever value was seen
/// first, so the answer depends on the order the ratings arrive in.
pub fn favorite_value(ratings: &[Rating]) -> Option<String> {
    let mut counts: Vec<(String, u64)> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for rating in ratings {
        let key = rating.value.to_string();
        let slot = match slots.get(&key) {
            Some(&slot) => slot,
            None => {
                counts.push((key.clone(), 0));
                slots.insert(key, counts.len() - 1);
                counts.len() - 1
            }
        };
        counts[slot].1 += 1;
    }

    let mut best: Option<(String, u64)> = None;
    for (value, count) in counts {
        if best.as_ref().is_none_or(|(_, top)| count > *top) {
            best = Some((value, count));
        }
    }

    best.map(|(value, _)| value)
}

/// Start of the trailing `window_days` window ending at `now`. Windows
/// reaching past the earliest representable instant start there.
pub fn window_start(now: DateTime<Utc>, window_days: u32) -> DateTime<Utc> {
    Duration::try_days(i64::from(window_days))
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Compares the two halves of the trailing window ending at `now`.
///
/// Ratings created before the window's midpoint form the first half, the
/// rest the second. `change` is second minus first; under 0.1 either way is
/// stable. When one half is empty there is nothing to compare and the trend
/// is reported as stable with no change.
pub fn network_trend(ratings: &[Rating], now: DateTime<Utc>, window_days: u32) -> NetworkTrend {
    let start = window_start(now, window_days);
    let midpoint = start + (now - start) / 2;

    let (first, second): (Vec<&Rating>, Vec<&Rating>) = ratings
        .iter()
        .filter(|r| r.created_at >= start && r.created_at <= now)
        .partition(|r| r.created_at < midpoint);

    let count_in_window = (first.len() + second.len()) as u64;
    if count_in_window == 0 {
        return NetworkTrend {
            trend: Trend::NoData,
            change: 0.0,
            first_half_avg: 0.0,
            second_half_avg: 0.0,
            count_in_window,
            window_days,
        };
    }

    let first_avg = mean(first.iter().copied());
    let second_avg = mean(second.iter().copied());

    let change = match (first_avg, second_avg) {
        (Some(a), Some(b)) => b - a,
        _ => Decimal::ZERO,
    };

    let trend = if change.abs() < Decimal::new(1, 1) {
        Trend::Stable
    } else if change > Decimal::ZERO {
        Trend::Improving
    } else {
        Trend::Declining
    };

    NetworkTrend {
        trend,
        change: to_f64(round2(change)),
        first_half_avg: first_avg.map(|m| to_f64(round2(m))).unwrap_or(0.0),
        second_half_avg: second_avg.map(|m| to_f64(round2(m))).unwrap_or(0.0),
        count_in_window,
        window_days,
    }
}
