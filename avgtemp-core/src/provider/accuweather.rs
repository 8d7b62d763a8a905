use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    guard::guarded_call,
    model::Coordinate,
    provider::{REQUEST_TIMEOUT, ServiceId, TemperatureProvider, parse_temp},
};

/// AccuWeather takes separate `latitude`/`longitude` query parameters,
/// each truncated to a whole number.
#[derive(Debug, Clone)]
pub struct AccuWeatherProvider {
    base_url: String,
    http: Client,
}

impl AccuWeatherProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AccuResponse {
    simpleforecast: AccuSimpleForecast,
}

#[derive(Debug, Deserialize)]
struct AccuSimpleForecast {
    forecastday: Vec<AccuForecastDay>,
}

#[derive(Debug, Deserialize)]
struct AccuForecastDay {
    current: AccuCurrent,
}

#[derive(Debug, Deserialize)]
struct AccuCurrent {
    fahrenheit: serde_json::Value,
}

#[async_trait]
impl TemperatureProvider for AccuWeatherProvider {
    fn id(&self) -> ServiceId {
        ServiceId::AccuWeather
    }

    async fn fetch(&self, coordinate: Coordinate) -> Result<String> {
        let latitude = coordinate.latitude as i64;
        let longitude = coordinate.longitude as i64;

        guarded_call(
            self.id(),
            self.http
                .get(&self.base_url)
                .query(&[
                    ("latitude", latitude.to_string()),
                    ("longitude", longitude.to_string()),
                ])
                .timeout(REQUEST_TIMEOUT)
                .send(),
        )
        .await
    }

    fn normalize(&self, body: &str) -> Result<i64> {
        let parsed: AccuResponse = serde_json::from_str(body)
            .map_err(|err| Error::malformed(self.id(), err.to_string()))?;

        let day = parsed
            .simpleforecast
            .forecastday
            .first()
            .ok_or_else(|| Error::malformed(self.id(), "forecastday array is empty"))?;

        parse_temp(self.id(), &day.current.fahrenheit)
    }
}
