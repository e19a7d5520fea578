use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    errors::AppError,
    models::slugify,
    stats::grade::Grade,
    validation::{self, NAME_MAX_CHARS, Validator},
};

/// An ISP or network provider that users rate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub active: bool,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkHeader {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<&Network> for NetworkHeader {
    fn from(network: &Network) -> Self {
        Self {
            id: network.id,
            name: network.name.clone(),
            slug: network.slug.clone(),
        }
    }
}

/// Per-network aggregate row produced by the statistics listing query.
#[derive(Debug, Clone, FromRow)]
pub struct NetworkOverviewRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub active: bool,
    pub avg_rating: Option<Decimal>,
    pub review_count: i64,
    pub total_comments: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkOverview {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub active: bool,
    pub average_rating: f64,
    pub total_reviews: u64,
    pub total_comments: u64,
    pub grade: Grade,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNetworkPayload {
    pub name: String,
    pub image: Option<String>,
    pub active: Option<bool>,
    pub slug: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewNetwork {
    pub name: String,
    pub image: Option<String>,
    pub active: bool,
    pub slug: String,
}

impl NewNetworkPayload {
    pub fn validate(self) -> Result<NewNetwork, AppError> {
        let mut v = Validator::new();
        let name = v.check("name", validation::non_blank(&self.name, NAME_MAX_CHARS));

        let slug = match self.slug.as_deref().map(slugify) {
            Some(slug) if !slug.is_empty() => Some(slug),
            _ => name.as_deref().map(slugify),
        };
        if name.is_some() && slug.as_deref().is_none_or(str::is_empty) {
            v.fail("slug", "Could not derive a slug from the name");
        }

        let image = self
            .image
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty());

        v.finish(|| NewNetwork {
            name: name.unwrap_or_default(),
            image,
            active: self.active.unwrap_or(true),
            slug: slug.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_derived_from_name() {
        let network = NewNetworkPayload {
            name: "Spectranet 4G".into(),
            image: None,
            active: None,
            slug: None,
        }
        .validate()
        .unwrap();

        assert_eq!(network.slug, "spectranet-4g");
        assert!(network.active);
    }

    #[test]
    fn test_blank_name_rejected() {
        let result = NewNetworkPayload {
            name: "   ".into(),
            image: None,
            active: Some(false),
            slug: Some("x".into()),
        }
        .validate();

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
