use std::{convert::Infallible, net::SocketAddr, time::Duration};

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, request::Parts},
};
use serde::Deserialize;

use crate::{errors::AppError, stats::geo::GeoPoint};

/// Upper bound for one ipstack round trip. A slow lookup counts as no location.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// A place name ("City, Country") and its coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub place: String,
    pub point: GeoPoint,
}

#[derive(Debug, Deserialize)]
struct IpstackResponse {
    city: Option<String>,
    country_name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl IpstackResponse {
    fn into_location(self) -> Option<ResolvedLocation> {
        let point = GeoPoint::new(self.latitude?, self.longitude?);
        if !point.is_valid() {
            return None;
        }

        Some(ResolvedLocation {
            place: format!("{}, {}", self.city?, self.country_name?),
            point,
        })
    }
}

/// Resolves client IPs to a location through the ipstack API.
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: reqwest::Client,
    base_url: String,
    access_key: Option<String>,
}

impl IpLocator {
    pub fn new(base_url: impl Into<String>, access_key: Option<String>) -> Self {
        Self::with_timeout(base_url, access_key, LOOKUP_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        access_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build geolocation client, using defaults: {}", e);
                reqwest::Client::new()
            });

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_key,
        }
    }

    /// `None` when the lookup is disabled, fails, or the answer lacks a city,
    /// country or coordinates. Failures are logged, never returned.
    pub async fn locate(&self, ip: Option<&str>) -> Option<ResolvedLocation> {
        let ip = ip?;
        match self.lookup(ip).await {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!("Error fetching location data for {}: {}", ip, e);
                None
            }
        }
    }

    async fn lookup(&self, ip: &str) -> Result<Option<ResolvedLocation>, AppError> {
        let Some(key) = self.access_key.as_deref() else {
            tracing::debug!("IPSTACK_KEY not set, skipping geolocation");
            return Ok(None);
        };

        let url = format!("{}/{}", self.base_url, ip);
        let res = self
            .client
            .get(&url)
            .query(&[("access_key", key)])
            .send()
            .await
            .map_err(|e| AppError::Geolocation(format!("Request failed: {}", e)))?;

        if !res.status().is_success() {
            return Err(AppError::Geolocation(format!(
                "Lookup returned status {}",
                res.status()
            )));
        }

        let body: IpstackResponse = res
            .json()
            .await
            .map_err(|e| AppError::Geolocation(format!("Invalid JSON response: {}", e)))?;

        Ok(body.into_location())
    }
}

/// First `X-Forwarded-For` entry, else the peer address.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

/// The caller's IP address, if one can be determined.
pub struct ClientIp(pub Option<String>);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(ClientIp(client_ip(&parts.headers, peer)))
    }
}
