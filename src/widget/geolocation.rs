use std::time::Duration;

use anyhow::{Error, Result};
use async_trait::async_trait;

use crate::core::Coordinates;

pub const DEFAULT_GEOLOCATION_URL: &str = "https://ipapi.co/json/";

#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, Error>;
}

/// Approximate position from an IP lookup service that responds with
/// `latitude` and `longitude` fields.
pub struct HttpGeolocator {
    url: String,
}

impl HttpGeolocator {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }
}

impl Default for HttpGeolocator {
    fn default() -> Self {
        Self::new(DEFAULT_GEOLOCATION_URL)
    }
}

#[async_trait]
impl Geolocator for HttpGeolocator {
    async fn current_position(&self) -> Result<Coordinates, Error> {
        let coordinates = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_secs(10))
            .send()
            .await?
            .error_for_status()?
            .json::<Coordinates>()
            .await?;
        Ok(coordinates)
    }
}
