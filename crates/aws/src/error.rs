//! SDK error classification
//!
//! Maps SDK failures onto `ProviderError`. Service errors are classified by
//! their error code; failures that never produced a service response
//! (dispatch failure, timeout, unparseable response) are network errors.

use aws_smithy_types::error::display::DisplayErrorContext;
use aws_smithy_types::error::metadata::ProvideErrorMetadata;
use vpro_core::{Error, ProviderError};

/// Convert an SDK error into a vpro-core error
pub fn provider_error<E>(err: E) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let detail = DisplayErrorContext(&err).to_string();

    let provider_err = match err.code() {
        Some(code) => {
            let message = err.message().map(str::to_string).unwrap_or(detail);
            ProviderError::from_service_code(code, message)
        }
        None => ProviderError::Network(detail),
    };

    tracing::debug!(error = %provider_err, "SDK call failed");
    provider_err.into()
}
