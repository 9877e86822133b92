use std::error::Error;

use tokio::sync::mpsc;

/// Sink for request failures that should reach the user.
///
/// All failures are reported the same way; no distinction is made between
/// network errors, missing apps or malformed responses.
pub trait ErrorReporter {
    /// Report one failure.
    fn report(&self, error: &(dyn Error + Send + Sync));
}

/// Reports failures to the log at `error` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, error: &(dyn Error + Send + Sync)) {
        tracing::error!(error = %error, "marketplace request failed");
    }
}

/// Network-error channel for a UI that shows failures out of band.
impl ErrorReporter for mpsc::UnboundedSender<String> {
    fn report(&self, error: &(dyn Error + Send + Sync)) {
        tracing::warn!(error = %error, "marketplace request failed");
        let _ = self.send(error.to_string());
    }
}
