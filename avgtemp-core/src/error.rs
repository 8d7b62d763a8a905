use thiserror::Error;

use crate::provider::ServiceId;

/// Failures surfaced by the aggregation core.
///
/// Every variant that involves a provider names it, so an outer layer
/// can log or report which call failed and at which stage.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller asked for an average over zero services.
    #[error("at least one weather service must be requested")]
    InvalidRequest,

    /// The caller named a service outside the supported set.
    #[error("unknown weather service '{name}'")]
    UnknownService { name: String },

    /// A provider call failed at the transport level or returned a
    /// non-success status. The response body, if any, is discarded.
    #[error("{service} request failed: {reason}")]
    ExternalService { service: ServiceId, reason: String },

    /// A provider answered successfully but the payload did not match
    /// its documented schema.
    #[error("{service} returned an unexpected payload: {reason}")]
    MalformedResponse { service: ServiceId, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn external(service: ServiceId, reason: impl Into<String>) -> Self {
        Error::ExternalService { service, reason: reason.into() }
    }

    pub(crate) fn malformed(service: ServiceId, reason: impl Into<String>) -> Self {
        Error::MalformedResponse { service, reason: reason.into() }
    }
}
