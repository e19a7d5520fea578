use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{network, rating},
    errors::AppError,
    models::{Network, Rating},
};

/// Read-only access to the rows the statistics need.
#[async_trait]
pub trait RatingLookup: Send + Sync {
    async fn ratings_for_network(&self, network_id: i64) -> Result<Vec<Rating>, AppError>;

    async fn ratings_for_network_since(
        &self,
        network_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<Rating>, AppError>;

    async fn ratings_for_user(&self, user_id: Uuid) -> Result<Vec<Rating>, AppError>;

    /// Every rating that carries both coordinates.
    async fn ratings_with_location(&self) -> Result<Vec<Rating>, AppError>;

    async fn network_by_id(&self, network_id: i64) -> Result<Option<Network>, AppError>;

    async fn networks_by_ids(&self, ids: &[i64]) -> Result<Vec<Network>, AppError>;
}

#[async_trait]
impl RatingLookup for PgPool {
    async fn ratings_for_network(&self, network_id: i64) -> Result<Vec<Rating>, AppError> {
        rating::get::get_ratings_by_network(network_id, None, self.clone()).await
    }

    async fn ratings_for_network_since(
        &self,
        network_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<Rating>, AppError> {
        rating::get::get_ratings_by_network(network_id, Some(since), self.clone()).await
    }

    async fn ratings_for_user(&self, user_id: Uuid) -> Result<Vec<Rating>, AppError> {
        rating::get::get_ratings_by_user(user_id, self.clone()).await
    }

    async fn ratings_with_location(&self) -> Result<Vec<Rating>, AppError> {
        rating::get::get_located_ratings(self.clone()).await
    }

    async fn network_by_id(&self, network_id: i64) -> Result<Option<Network>, AppError> {
        network::get::get_network_by_id(network_id, self.clone()).await
    }

    async fn networks_by_ids(&self, ids: &[i64]) -> Result<Vec<Network>, AppError> {
        network::get::get_networks_by_ids(ids, self.clone()).await
    }
}
