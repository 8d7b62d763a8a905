use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    guard::guarded_call,
    model::Coordinate,
    provider::{REQUEST_TIMEOUT, ServiceId, TemperatureProvider, parse_temp},
};

/// NOAA exposes current conditions behind a single combined `latlon`
/// query parameter, e.g. `latlon=33.3,44.4`.
#[derive(Debug, Clone)]
pub struct NoaaProvider {
    base_url: String,
    http: Client,
}

impl NoaaProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NoaaResponse {
    today: NoaaToday,
}

#[derive(Debug, Deserialize)]
struct NoaaToday {
    current: NoaaCurrent,
}

#[derive(Debug, Deserialize)]
struct NoaaCurrent {
    fahrenheit: serde_json::Value,
}

#[async_trait]
impl TemperatureProvider for NoaaProvider {
    fn id(&self) -> ServiceId {
        ServiceId::Noaa
    }

    async fn fetch(&self, coordinate: Coordinate) -> Result<String> {
        // Decimal values joined verbatim, no rounding.
        let lat_lon = format!("{},{}", coordinate.latitude, coordinate.longitude);

        guarded_call(
            self.id(),
            self.http
                .get(&self.base_url)
                .query(&[("latlon", lat_lon.as_str())])
                .timeout(REQUEST_TIMEOUT)
                .send(),
        )
        .await
    }

    fn normalize(&self, body: &str) -> Result<i64> {
        let parsed: NoaaResponse = serde_json::from_str(body)
            .map_err(|err| Error::malformed(self.id(), err.to_string()))?;

        parse_temp(self.id(), &parsed.today.current.fahrenheit)
    }
}
