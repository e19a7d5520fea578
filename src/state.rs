use std::sync::Arc;

use sqlx::PgPool;

use crate::{config::Config, geolocate::IpLocator};

#[derive(Clone)]
pub struct AppState {
    pub postgres: PgPool,
    pub config: Arc<Config>,
    pub locator: IpLocator,
}

impl AppState {
    pub fn new(postgres: PgPool, config: Config) -> Self {
        let locator = IpLocator::new(&config.ipstack_base_url, config.ipstack_key.clone());
        Self {
            postgres,
            config: Arc::new(config),
            locator,
        }
    }
}
