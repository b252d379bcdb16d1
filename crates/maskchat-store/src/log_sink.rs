//! Write-only sink for operational errors and not-found reports.

/// Receives one line of text per swallowed failure.
pub trait LogSink {
    fn log(&self, message: &str);
}

/// Default sink: forwards every line to `tracing` at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, message: &str) {
        tracing::warn!(target: "maskchat_store", "{message}");
    }
}

impl<F> LogSink for F
where
    F: Fn(&str),
{
    fn log(&self, message: &str) {
        self(message)
    }
}
