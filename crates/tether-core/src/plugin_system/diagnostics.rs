/// Receives the single diagnostic emitted for a failed load.
pub trait DiagnosticSink: Send + Sync {
    fn error(&self, message: &str);
}

/// Forwards diagnostics to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn error(&self, message: &str) {
        log::error!("{}", message);
    }
}
