use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user ID
    pub username: String,
    #[serde(default)]
    pub is_staff: bool,
    pub exp: usize, // expiration time
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::Unauthorized("Invalid user ID in token".into()))
    }

    /// Owners and staff may change or remove a record.
    pub fn can_modify(&self, owner: Uuid) -> bool {
        self.is_staff || self.user_id().is_ok_and(|id| id == owner)
    }
}
