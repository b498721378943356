use tracing::warn;

/// Sink for user-facing failure notices (a toast, a status bar, stderr).
pub trait Notifier: Send + Sync {
    fn notify(
        &self,
        message: &str,
    );
}

/// Notifier that only logs. Used when no UI surface is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(
        &self,
        message: &str,
    ) {
        warn!(%message, "notification");
    }
}
