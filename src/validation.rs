use rust_decimal::Decimal;

use crate::{
    errors::{AppError, FieldError},
    stats::geo::GeoPoint,
};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;
pub const REVIEW_MIN_CHARS: usize = 10;
pub const REVIEW_MAX_CHARS: usize = 225;
pub const ADDRESS_MAX_CHARS: usize = 500;
pub const NAME_MAX_CHARS: usize = 255;

/// Collects field errors so a payload reports every problem at once.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check<T>(&mut self, field: &'static str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.errors.push(FieldError::new(field, message));
                None
            }
        }
    }

    pub fn fail(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn finish<T>(self, build: impl FnOnce() -> T) -> Result<T, AppError> {
        if self.errors.is_empty() {
            Ok(build())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

/// Rating values are stored with one decimal place between 1.0 and 5.0.
pub fn rating_value(value: f64) -> Result<Decimal, String> {
    if !value.is_finite() {
        return Err("Rating must be a number".into());
    }

    let tenths = value * 10.0;
    if (tenths - tenths.round()).abs() > 1e-9 {
        return Err("Rating must have at most one decimal place".into());
    }

    let decimal = Decimal::new(tenths.round() as i64, 1);
    if decimal < Decimal::from(MIN_RATING) || decimal > Decimal::from(MAX_RATING) {
        return Err(format!("Rating must be between {MIN_RATING}.0 and {MAX_RATING}.0"));
    }

    Ok(decimal)
}

pub fn review_text(review: &str) -> Result<String, String> {
    let trimmed = review.trim();
    let len = trimmed.chars().count();

    if len < REVIEW_MIN_CHARS {
        return Err(format!("Review must be at least {REVIEW_MIN_CHARS} characters"));
    }
    if len > REVIEW_MAX_CHARS {
        return Err(format!("Review must be at most {REVIEW_MAX_CHARS} characters"));
    }

    Ok(trimmed.to_string())
}

pub fn address(address: Option<String>) -> Result<Option<String>, String> {
    match address.map(|a| a.trim().to_string()) {
        Some(a) if a.is_empty() => Ok(None),
        Some(a) if a.chars().count() > ADDRESS_MAX_CHARS => Err(format!(
            "Address must be at most {ADDRESS_MAX_CHARS} characters"
        )),
        other => Ok(other),
    }
}

/// Latitude and longitude travel together: both or neither.
pub fn coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<GeoPoint>, String> {
    match (latitude, longitude) {
        (None, None) => Ok(None),
        (Some(lat), Some(lon)) => {
            let point = GeoPoint::new(lat, lon);
            if point.is_valid() {
                Ok(Some(point))
            } else {
                Err("Coordinates are out of range".into())
            }
        }
        _ => Err("Latitude and longitude must be provided together".into()),
    }
}

pub fn non_blank(value: &str, max_chars: usize) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Must not be blank".into());
    }
    if trimmed.chars().count() > max_chars {
        return Err(format!("Must be at most {max_chars} characters"));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_value_bounds() {
        assert_eq!(rating_value(1.0), Ok(Decimal::new(10, 1)));
        assert_eq!(rating_value(3.5), Ok(Decimal::new(35, 1)));
        assert_eq!(rating_value(5.0), Ok(Decimal::new(50, 1)));

        assert!(rating_value(0.9).is_err());
        assert!(rating_value(5.1).is_err());
        assert!(rating_value(f64::NAN).is_err());
    }

    #[test]
    fn test_rating_value_single_decimal_place() {
        assert_eq!(rating_value(4.1), Ok(Decimal::new(41, 1)));
        assert!(
            rating_value(3.25)
                .unwrap_err()
                .contains("one decimal place")
        );
    }

    #[test]
    fn test_review_length() {
        assert!(review_text("too short").is_err());
        assert_eq!(review_text("  fast and stable  ").unwrap(), "fast and stable");
        assert!(review_text(&"x".repeat(REVIEW_MAX_CHARS + 1)).is_err());
    }

    #[test]
    fn test_coordinates_must_be_paired() {
        assert_eq!(coordinates(None, None), Ok(None));
        assert!(coordinates(Some(6.5), None).is_err());
        assert!(coordinates(None, Some(3.4)).is_err());
        assert!(coordinates(Some(91.0), Some(0.0)).is_err());
        assert_eq!(
            coordinates(Some(6.5), Some(3.4)),
            Ok(Some(GeoPoint::new(6.5, 3.4)))
        );
    }

    #[test]
    fn test_blank_address_is_dropped() {
        assert_eq!(address(Some("   ".into())), Ok(None));
        assert_eq!(address(Some(" Yaba ".into())), Ok(Some("Yaba".into())));
        assert!(address(Some("a".repeat(ADDRESS_MAX_CHARS + 1))).is_err());
    }

    #[test]
    fn test_validator_collects_every_error() {
        let mut v = Validator::new();
        v.check("rating", rating_value(9.0));
        v.check("review", review_text("meh"));

        match v.finish(|| ()) {
            Err(AppError::Validation(errors)) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
                assert_eq!(fields, vec!["rating", "review"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
