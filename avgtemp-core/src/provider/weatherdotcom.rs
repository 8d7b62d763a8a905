use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    guard::guarded_call,
    model::Coordinate,
    provider::{REQUEST_TIMEOUT, ServiceId, TemperatureProvider, parse_temp},
};

/// Weather.com is the odd one out: a POST with a JSON coordinate body,
/// and the only provider that reports a unit alongside the temperature.
#[derive(Debug, Clone)]
pub struct WeatherDotComProvider {
    base_url: String,
    http: Client,
}

impl WeatherDotComProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DotComRequest {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct DotComResponse {
    query: DotComQuery,
}

#[derive(Debug, Deserialize)]
struct DotComQuery {
    results: DotComResults,
}

#[derive(Debug, Deserialize)]
struct DotComResults {
    channel: DotComChannel,
}

#[derive(Debug, Deserialize)]
struct DotComChannel {
    condition: DotComCondition,
    units: DotComUnits,
}

#[derive(Debug, Deserialize)]
struct DotComCondition {
    temp: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct DotComUnits {
    temperature: String,
}

#[async_trait]
impl TemperatureProvider for WeatherDotComProvider {
    fn id(&self) -> ServiceId {
        ServiceId::WeatherDotCom
    }

    async fn fetch(&self, coordinate: Coordinate) -> Result<String> {
        let body = DotComRequest {
            lat: coordinate.latitude,
            lon: coordinate.longitude,
        };

        guarded_call(
            self.id(),
            self.http
                .post(&self.base_url)
                .json(&body)
                .timeout(REQUEST_TIMEOUT)
                .send(),
        )
        .await
    }

    fn normalize(&self, body: &str) -> Result<i64> {
        let parsed: DotComResponse = serde_json::from_str(body)
            .map_err(|err| Error::malformed(self.id(), err.to_string()))?;

        let channel = parsed.query.results.channel;
        let temp = parse_temp(self.id(), &channel.condition.temp)?;

        // Any unit other than "F" is assumed Celsius. The scaled value
        // is truncated before the 32 offset is added.
        if channel.units.temperature == "F" {
            Ok(temp)
        } else {
            Ok(temp * 9 / 5 + 32)
        }
    }
}
