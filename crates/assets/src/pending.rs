use crate::AssetLoadError;
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// A load running on a worker thread.
///
/// The result is delivered exactly once, through [`PendingLoad::poll`] or
/// [`PendingLoad::wait`].
#[derive(Debug)]
pub struct PendingLoad<T> {
    rx: Receiver<Result<T, AssetLoadError>>,
}

impl<T: Send + 'static> PendingLoad<T> {
    pub fn spawn<F>(label: &str, job: F) -> Self
    where
        F: FnOnce() -> Result<T, AssetLoadError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let spawned = std::thread::Builder::new()
            .name(format!("asset-{label}"))
            .spawn(move || {
                // The receiver may have been dropped; nothing to deliver to.
                let _ = tx.send(job());
            });
        if let Err(err) = spawned {
            // The sender died with the closure, so polling reports Disconnected.
            tracing::error!(label, error = %err, "failed to spawn asset loader");
        }
        Self { rx }
    }
}

impl<T> PendingLoad<T> {
    /// A load that has already completed.
    pub fn ready(result: Result<T, AssetLoadError>) -> Self {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(result);
        Self { rx }
    }

    /// Non-blocking check. `None` while the load is still running.
    pub fn poll(&self) -> Option<Result<T, AssetLoadError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(AssetLoadError::Disconnected)),
        }
    }

    /// Block until the load completes.
    pub fn wait(self) -> Result<T, AssetLoadError> {
        self.rx
            .recv()
            .unwrap_or_else(|_| Err(AssetLoadError::Disconnected))
    }
}
