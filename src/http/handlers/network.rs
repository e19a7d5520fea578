use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    auth::AuthClaims,
    db::{
        device::{get::list_devices, post::create_device},
        network::{get::list_networks, post::create_network},
    },
    errors::AppError,
    models::{
        Claims,
        device::{Device, NewDevicePayload},
        network::{Network, NewNetworkPayload},
    },
    state::AppState,
};

#[derive(Deserialize)]
pub struct NetworkQuery {
    pub search: Option<String>,
    pub active_only: Option<bool>,
}

pub async fn list_networks_handler(
    State(state): State<AppState>,
    Query(query): Query<NetworkQuery>,
) -> Result<Json<Vec<Network>>, (StatusCode, String)> {
    let networks = list_networks(
        query.search.as_deref(),
        query.active_only.unwrap_or(false),
        state.postgres.clone(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Error listing networks: {}", e);
        e.to_response()
    })?;

    Ok(Json(networks))
}

pub async fn create_network_handler(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<NewNetworkPayload>,
) -> Result<(StatusCode, Json<Network>), (StatusCode, String)> {
    require_staff(&claims).map_err(|e| e.to_response())?;
    let network = payload.validate().map_err(|e| e.to_response())?;

    match create_network(network, state.postgres.clone()).await {
        Ok(network) => Ok((StatusCode::CREATED, Json(network))),
        Err(err) => {
            tracing::error!("Error creating network: {}", err);
            Err(err.to_response())
        }
    }
}

pub async fn list_devices_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Device>>, (StatusCode, String)> {
    let devices = list_devices(state.postgres.clone()).await.map_err(|e| {
        tracing::error!("Error listing devices: {}", e);
        e.to_response()
    })?;

    Ok(Json(devices))
}

pub async fn create_device_handler(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<NewDevicePayload>,
) -> Result<(StatusCode, Json<Device>), (StatusCode, String)> {
    require_staff(&claims).map_err(|e| e.to_response())?;
    let device = payload.validate().map_err(|e| e.to_response())?;

    match create_device(device, state.postgres.clone()).await {
        Ok(device) => Ok((StatusCode::CREATED, Json(device))),
        Err(err) => {
            tracing::error!("Error creating device: {}", err);
            Err(err.to_response())
        }
    }
}

fn require_staff(claims: &Claims) -> Result<(), AppError> {
    if claims.is_staff {
        Ok(())
    } else {
        Err(AppError::Forbidden("Staff access required".into()))
    }
}
