use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    errors::AppError,
    models::slugify,
    validation::{self, NAME_MAX_CHARS, Validator},
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDevicePayload {
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewDevice {
    pub name: String,
    pub slug: String,
}

impl NewDevicePayload {
    pub fn validate(self) -> Result<NewDevice, AppError> {
        let mut v = Validator::new();
        let name = v.check("name", validation::non_blank(&self.name, NAME_MAX_CHARS));

        let slug = match self.slug.as_deref().map(slugify) {
            Some(slug) if !slug.is_empty() => Some(slug),
            _ => name.as_deref().map(slugify),
        };
        if name.is_some() && slug.as_deref().is_none_or(str::is_empty) {
            v.fail("slug", "Could not derive a slug from the name");
        }

        v.finish(|| NewDevice {
            name: name.unwrap_or_default(),
            slug: slug.unwrap_or_default(),
        })
    }
}
