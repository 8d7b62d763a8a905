use std::{collections::HashMap, convert::TryFrom, fmt::Debug, time::Duration};

use async_trait::async_trait;

use crate::{
    Config,
    error::{Error, Result},
    model::Coordinate,
    provider::{
        accuweather::AccuWeatherProvider, noaa::NoaaProvider, weatherdotcom::WeatherDotComProvider,
    },
};

pub mod accuweather;
pub mod noaa;
pub mod weatherdotcom;

/// Upper bound on any single provider call, so one hung provider cannot
/// stall the whole aggregation.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The closed set of supported weather services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    Noaa,
    WeatherDotCom,
    AccuWeather,
}

impl ServiceId {
    /// Canonical wire name, as callers spell it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::Noaa => "NOAA",
            ServiceId::WeatherDotCom => "WEATHER_DOT_COM",
            ServiceId::AccuWeather => "ACCUWEATHER",
        }
    }

    pub const fn all() -> &'static [ServiceId] {
        &[ServiceId::Noaa, ServiceId::WeatherDotCom, ServiceId::AccuWeather]
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServiceId {
    type Error = Error;

    /// Service names are identity tokens: matching is exact and
    /// case-sensitive, so `"noaa"` is rejected.
    fn try_from(value: &str) -> Result<Self> {
        match value {
            "NOAA" => Ok(ServiceId::Noaa),
            "WEATHER_DOT_COM" => Ok(ServiceId::WeatherDotCom),
            "ACCUWEATHER" => Ok(ServiceId::AccuWeather),
            _ => Err(Error::UnknownService { name: value.to_string() }),
        }
    }
}

/// One third-party weather service.
///
/// `fetch` is the adapter's single side-effecting operation; `normalize`
/// is a pure transform from the raw body to an integer Fahrenheit
/// reading. The two are split so response decoding can be tested
/// without any network.
#[async_trait]
pub trait TemperatureProvider: Send + Sync + Debug {
    fn id(&self) -> ServiceId;

    /// Issue the provider's single outbound call and return the raw
    /// response body.
    async fn fetch(&self, coordinate: Coordinate) -> Result<String>;

    /// Decode the provider-specific payload into integer Fahrenheit.
    fn normalize(&self, body: &str) -> Result<i64>;

    /// Current temperature at `coordinate`, in Fahrenheit.
    async fn current_fahrenheit(&self, coordinate: Coordinate) -> Result<i64> {
        let body = self.fetch(coordinate).await?;
        self.normalize(&body)
    }
}

/// Providers are inconsistent about whether numeric leaves arrive as
/// JSON numbers or quoted strings; accept both, truncating fractional
/// values toward zero.
pub(crate) fn parse_temp(service: ServiceId, value: &serde_json::Value) -> Result<i64> {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| Error::malformed(service, format!("temperature out of range: {n}"))),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::malformed(service, format!("temperature is not an integer: '{s}'"))),
        other => Err(Error::malformed(service, format!("temperature has unexpected type: {other}"))),
    }
}

/// Immutable mapping from service name to its adapter.
///
/// Built once by explicit registration; the registry is the source of
/// truth for which service names are valid.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ServiceId, Box<dyn TemperatureProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Box<dyn TemperatureProvider>) {
        self.providers.insert(provider.id(), provider);
    }

    /// Registry over all three services, with endpoints taken from config.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(NoaaProvider::new(config.service_url(ServiceId::Noaa))));
        registry.register(Box::new(WeatherDotComProvider::new(
            config.service_url(ServiceId::WeatherDotCom),
        )));
        registry.register(Box::new(AccuWeatherProvider::new(
            config.service_url(ServiceId::AccuWeather),
        )));
        registry
    }

    /// Look up the adapter for a caller-supplied service name.
    pub fn resolve(&self, name: &str) -> Result<&dyn TemperatureProvider> {
        let id = ServiceId::try_from(name)?;
        self.providers
            .get(&id)
            .map(|provider| provider.as_ref())
            .ok_or_else(|| Error::UnknownService { name: name.to_string() })
    }
}
