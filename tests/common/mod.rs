#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use radeur_be::models::Rating;
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

pub fn days_after_base(days: i64) -> DateTime<Utc> {
    base_time() + Duration::days(days)
}

/// A rating with `value` given as tenths, e.g. 45 for 4.5.
pub fn rating(id: i64, network_id: Option<i64>, tenths: i64) -> Rating {
    Rating {
        id,
        user_id: Uuid::nil(),
        network_id,
        device_id: None,
        value: Decimal::new(tenths, 1),
        latitude: None,
        longitude: None,
        address: None,
        review: "Signal was steady all week".to_string(),
        created_at: base_time(),
    }
}

pub fn rating_at(
    id: i64,
    network_id: Option<i64>,
    tenths: i64,
    created_at: DateTime<Utc>,
) -> Rating {
    Rating {
        created_at,
        ..rating(id, network_id, tenths)
    }
}

pub fn located_rating(
    id: i64,
    network_id: Option<i64>,
    tenths: i64,
    latitude: f64,
    longitude: f64,
) -> Rating {
    Rating {
        latitude: Some(latitude),
        longitude: Some(longitude),
        ..rating(id, network_id, tenths)
    }
}
