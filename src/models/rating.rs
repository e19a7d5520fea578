use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    errors::AppError,
    stats::geo::GeoPoint,
    validation::{self, Validator},
};

/// A stored rating row. Latitude and longitude are either both set or both
/// empty; the schema enforces the pairing.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Rating {
    pub id: i64,
    pub user_id: Uuid,
    pub network_id: Option<i64>,
    pub device_id: Option<i64>,
    pub value: Decimal,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub review: String,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    pub fn location(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }
}

/// Outward representation of a rating. Coordinates are never exposed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingView {
    pub id: i64,
    pub user_id: Uuid,
    pub network_id: Option<i64>,
    pub device_id: Option<i64>,
    pub rating: Decimal,
    pub address: Option<String>,
    pub review: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Rating> for RatingView {
    fn from(r: &Rating) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            network_id: r.network_id,
            device_id: r.device_id,
            rating: r.value,
            address: r.address.clone(),
            review: r.review.clone(),
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRatingPayload {
    pub network_id: Option<i64>,
    pub device_id: Option<i64>,
    pub rating: f64,
    pub review: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRating {
    pub network_id: Option<i64>,
    pub device_id: Option<i64>,
    pub value: Decimal,
    pub review: String,
    pub address: Option<String>,
    pub location: Option<GeoPoint>,
}

impl NewRatingPayload {
    pub fn validate(self) -> Result<NewRating, AppError> {
        let mut v = Validator::new();
        let value = v.check("rating", validation::rating_value(self.rating));
        let review = v.check("review", validation::review_text(&self.review));
        let address = v.check("address", validation::address(self.address));
        let location = v.check(
            "location",
            validation::coordinates(self.latitude, self.longitude),
        );

        v.finish(|| NewRating {
            network_id: self.network_id,
            device_id: self.device_id,
            value: value.unwrap_or_default(),
            review: review.unwrap_or_default(),
            address: address.flatten(),
            location: location.flatten(),
        })
    }
}

impl NewRating {
    /// Folds an IP-derived location into the rating. Coordinates the user
    /// supplied are kept; the resolved place name is appended to the address.
    pub fn enrich(&mut self, place: &str, point: GeoPoint) {
        if self.location.is_some() {
            return;
        }

        self.location = Some(point);
        self.address = Some(match self.address.take() {
            Some(address) => format!("{address}, {place}"),
            None => place.to_string(),
        });
    }
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingChangesPayload {
    pub network_id: Option<i64>,
    pub device_id: Option<i64>,
    pub rating: Option<f64>,
    pub review: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingChanges {
    pub network_id: Option<i64>,
    pub device_id: Option<i64>,
    pub value: Option<Decimal>,
    pub review: Option<String>,
    pub address: Option<String>,
    pub location: Option<GeoPoint>,
}

impl RatingChangesPayload {
    pub fn validate(self) -> Result<RatingChanges, AppError> {
        let mut v = Validator::new();
        let value = self
            .rating
            .and_then(|r| v.check("rating", validation::rating_value(r)));
        let review = self
            .review
            .as_deref()
            .and_then(|r| v.check("review", validation::review_text(r)));
        let address = v
            .check("address", validation::address(self.address))
            .flatten();
        let location = v
            .check(
                "location",
                validation::coordinates(self.latitude, self.longitude),
            )
            .flatten();

        v.finish(|| RatingChanges {
            network_id: self.network_id,
            device_id: self.device_id,
            value,
            review,
            address,
            location,
        })
    }
}

impl RatingChanges {
    pub fn apply(self, rating: &mut Rating) {
        if let Some(network_id) = self.network_id {
            rating.network_id = Some(network_id);
        }
        if let Some(device_id) = self.device_id {
            rating.device_id = Some(device_id);
        }
        if let Some(value) = self.value {
            rating.value = value;
        }
        if let Some(review) = self.review {
            rating.review = review;
        }
        if let Some(address) = self.address {
            rating.address = Some(address);
        }
        if let Some(point) = self.location {
            rating.latitude = Some(point.latitude);
            rating.longitude = Some(point.longitude);
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RatingListQuery {
    pub network_id: Option<i64>,
    pub device_id: Option<i64>,
    pub min_rating: Option<f64>,
    pub search: Option<String>,
    pub nearby: Option<bool>,
    pub radius: Option<f64>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Database-side filters for the rating listing.
#[derive(Debug, Clone, Default)]
pub struct RatingFilter {
    pub network_id: Option<i64>,
    pub device_id: Option<i64>,
    pub min_rating: Option<Decimal>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> NewRatingPayload {
        NewRatingPayload {
            network_id: Some(1),
            device_id: None,
            rating: 4.0,
            review: "Strong signal all day".into(),
            address: Some("Yaba".into()),
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn test_enrich_appends_place_and_sets_coordinates() {
        let mut rating = payload().validate().unwrap();
        rating.enrich("Lagos, Nigeria", GeoPoint::new(6.45, 3.39));

        assert_eq!(rating.address.as_deref(), Some("Yaba, Lagos, Nigeria"));
        assert_eq!(rating.location, Some(GeoPoint::new(6.45, 3.39)));
    }

    #[test]
    fn test_enrich_keeps_user_coordinates() {
        let mut rating = NewRatingPayload {
            latitude: Some(9.07),
            longitude: Some(7.39),
            ..payload()
        }
        .validate()
        .unwrap();
        rating.enrich("Lagos, Nigeria", GeoPoint::new(6.45, 3.39));

        assert_eq!(rating.address.as_deref(), Some("Yaba"));
        assert_eq!(rating.location, Some(GeoPoint::new(9.07, 7.39)));
    }

    #[test]
    fn test_unpaired_coordinates_rejected() {
        let result = NewRatingPayload {
            latitude: Some(9.07),
            ..payload()
        }
        .validate();

        match result {
            Err(AppError::Validation(errors)) => assert_eq!(errors[0].field, "location"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_changes_only_touch_given_fields() {
        let mut rating = Rating {
            id: 1,
            user_id: Uuid::nil(),
            network_id: Some(1),
            device_id: None,
            value: Decimal::new(30, 1),
            latitude: None,
            longitude: None,
            address: None,
            review: "It was alright overall".into(),
            created_at: Utc::now(),
        };

        RatingChangesPayload {
            rating: Some(4.5),
            ..Default::default()
        }
        .validate()
        .unwrap()
        .apply(&mut rating);

        assert_eq!(rating.value, Decimal::new(45, 1));
        assert_eq!(rating.review, "It was alright overall");
        assert_eq!(rating.network_id, Some(1));
    }
}
