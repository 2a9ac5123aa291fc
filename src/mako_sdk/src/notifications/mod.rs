use tracing::{error, info};

/// Fire-and-forget UI side channel (toast bar, status line, test recorder).
pub trait NotificationSink: Send + Sync {
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Default sink: routes notifications into the tracing stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn info(&self, message: &str) {
        info!(target: "mako_sdk::notifications", "{}", message);
    }

    fn success(&self, message: &str) {
        info!(target: "mako_sdk::notifications", "{}", message);
    }

    fn error(&self, message: &str) {
        error!(target: "mako_sdk::notifications", "{}", message);
    }
}
