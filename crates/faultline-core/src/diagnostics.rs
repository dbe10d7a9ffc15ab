use std::sync::Arc;

use crate::error::HttpError;
use crate::failure::{Failure, FailureKind};
use crate::fault::DomainFault;

/// Observer notified once per classified failure
///
/// Implementations must not fail or block; nothing they do can affect the
/// response that is about to be rendered.
pub trait Diagnostics: Send + Sync {
    fn record(&self, raised: &Failure, resolved: &DomainFault);
}

impl<T: Diagnostics + ?Sized> Diagnostics for Arc<T> {
    fn record(&self, raised: &Failure, resolved: &DomainFault) {
        (**self).record(raised, resolved);
    }
}

/// Writes failures to the `tracing` subscriber at error level
///
/// Full error chains (and backtraces, when captured) are only emitted for
/// failures that carry a message.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record(&self, raised: &Failure, resolved: &DomainFault) {
        let at = jiff::Timestamp::now();
        let kind = raised.type_name();

        // Custom errors leave with their own status and code
        let (code, status) = match raised.as_custom() {
            Some(custom) => (custom.error_code(), custom.status_code()),
            None => (resolved.code(), resolved.status()),
        };

        tracing::error!(
            kind,
            %at,
            code,
            status = status.as_u16(),
            "{kind} occurred at: {at}"
        );

        if raised.has_message() {
            match raised.source_error() {
                Some(source) => tracing::error!(error = ?source, "stack trace"),
                None => tracing::error!(error = ?raised, "stack trace"),
            }
        }

        match raised.as_fault() {
            Some(fault) => tracing::error!("{}", fault.message()),
            None => tracing::error!("{}", raised.message().unwrap_or_default()),
        }

        if let FailureKind::NoRoute { method, path } = raised.primary() {
            tracing::error!(%method, %path, "cannot find uri: {method} - {path}");
        }
    }
}

/// Discards every record
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn record(&self, _raised: &Failure, _resolved: &DomainFault) {}
}
