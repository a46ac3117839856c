//! Shutdown fan-out to the sync loop and the HTTP server.

use tokio::sync::broadcast;

/// One-shot stop signal shared by long-running tasks.
///
/// Each task holds its own receiver. Dropping the `Shutdown` closes every
/// receiver, which tasks treat the same as a trigger.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver for a task started after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Stop every subscribed task. Safe to call more than once.
    pub fn trigger(&self) {
        let notified = self.tx.send(()).unwrap_or(0);
        tracing::debug!(tasks = notified, "Shutdown triggered");
    }

    /// Number of tasks still holding a receiver.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_reaches_all_subscribers() {
        let shutdown = Shutdown::new();
        let mut a = shutdown.subscribe();
        let mut b = shutdown.subscribe();
        assert_eq!(shutdown.receiver_count(), 2);

        shutdown.trigger();
        assert!(a.recv().await.is_ok());
        assert!(b.recv().await.is_ok());
    }

    #[tokio::test]
    async fn test_drop_closes_receivers() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();
        drop(shutdown);
        assert!(rx.recv().await.is_err());
    }
}
