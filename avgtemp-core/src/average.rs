//! Aggregation of per-provider readings into one average temperature.

use futures::future;

use crate::{
    error::{Error, Result},
    model::Coordinate,
    provider::ProviderRegistry,
};

/// Computes the mean current temperature over a caller-selected set of
/// services.
#[derive(Debug)]
pub struct AverageService {
    registry: ProviderRegistry,
}

impl AverageService {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Average current Fahrenheit temperature over `services`, which
    /// are caller-supplied service names in request order.
    ///
    /// The whole name list is resolved before any network call, so a
    /// request containing one unknown name is rejected with zero
    /// provider traffic, reporting the first unknown name in request
    /// order. Provider calls then fan out concurrently; the first
    /// failure cancels the calls still in flight and fails the whole
    /// aggregation — there is no partial result and no retry.
    ///
    /// The mean uses native integer division (truncation toward zero).
    pub async fn average_temp(&self, services: &[String], coordinate: Coordinate) -> Result<i64> {
        if services.is_empty() {
            return Err(Error::InvalidRequest);
        }

        let mut providers = Vec::with_capacity(services.len());
        for name in services {
            providers.push(self.registry.resolve(name)?);
        }

        tracing::debug!(
            services = services.len(),
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            "querying providers for current temperature"
        );

        let readings = future::try_join_all(
            providers.iter().map(|provider| provider.current_fahrenheit(coordinate)),
        )
        .await?;

        let sum: i64 = readings.iter().sum();
        Ok(sum / readings.len() as i64)
    }
}
