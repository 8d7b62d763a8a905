//! Failure classification for outbound provider calls.
//!
//! Every adapter's transport call goes through [`guarded_call`] so that
//! transport faults and non-success statuses are mapped to
//! [`Error::ExternalService`] in exactly one place.

use std::future::Future;

use crate::{
    error::{Error, Result},
    provider::ServiceId,
};

/// Run a provider's single transport call and classify the outcome.
///
/// Transport faults (connect, DNS, timeout, failure to read the body)
/// and non-success statuses both become [`Error::ExternalService`]; on
/// a non-success status the body is discarded, never normalized. On
/// success the raw body passes through unchanged. Exactly one attempt
/// is made, there is no retry.
pub(crate) async fn guarded_call<F>(service: ServiceId, call: F) -> Result<String>
where
    F: Future<Output = reqwest::Result<reqwest::Response>> + Send,
{
    let response = call.await.map_err(|err| {
        tracing::warn!(%service, error = %err, "provider transport call failed");
        Error::external(service, err.to_string())
    })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%service, %status, "provider returned non-success status");
        return Err(Error::external(service, format!("unexpected status {status}")));
    }

    response
        .text()
        .await
        .map_err(|err| Error::external(service, format!("failed to read response body: {err}")))
}
