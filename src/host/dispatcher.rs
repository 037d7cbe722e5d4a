//! Dispatcher over a tokio runtime handle.

use std::time::Duration;
use tokio::runtime::Handle;

use crate::filter::context::{Dispatcher, PostCb};

/// Runs posted callbacks as tasks on a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioDispatcher {
    handle: Handle,
}

impl TokioDispatcher {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Dispatcher for the runtime of the calling task.
    ///
    /// Panics outside a tokio runtime, like `Handle::current`.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl Dispatcher for TokioDispatcher {
    fn post(&self, cb: PostCb) {
        self.handle.spawn(async move { cb() });
    }

    fn post_delayed(&self, delay: Duration, cb: PostCb) {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            cb();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn post_runs_callback() {
        let dispatcher = TokioDispatcher::current();
        let (tx, rx) = oneshot::channel();
        dispatcher.post(Box::new(move || {
            let _ = tx.send(7);
        }));
        assert_eq!(rx.await.unwrap(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn post_delayed_waits() {
        let dispatcher = TokioDispatcher::current();
        let (tx, mut rx) = oneshot::channel();
        dispatcher.post_delayed(Duration::from_millis(50), Box::new(move || {
            let _ = tx.send(());
        }));

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_ok());
    }
}
