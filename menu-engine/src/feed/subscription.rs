use shared::MenuSnapshot;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::FeedError;

/// Live menu subscription
///
/// Holds the receiving end of a latest-snapshot channel and, for polling
/// feeds, the task producing it. Dropping the subscription cancels that
/// task; [`Subscription::unsubscribe`] also waits for it to finish.
#[derive(Debug)]
pub struct Subscription {
    receiver: watch::Receiver<Arc<MenuSnapshot>>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Subscription backed by a producer task that honours `cancel`
    pub fn new(
        receiver: watch::Receiver<Arc<MenuSnapshot>>,
        cancel: CancellationToken,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            receiver,
            cancel,
            task: Some(task),
        }
    }

    /// Subscription over a channel someone else feeds
    pub fn from_receiver(receiver: watch::Receiver<Arc<MenuSnapshot>>) -> Self {
        Self {
            receiver,
            cancel: CancellationToken::new(),
            task: None,
        }
    }

    /// A receiver for the snapshot stream, e.g. for [`crate::menu::LiveMenu`]
    pub fn snapshots(&self) -> watch::Receiver<Arc<MenuSnapshot>> {
        self.receiver.clone()
    }

    pub fn latest(&self) -> Arc<MenuSnapshot> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next snapshot
    pub async fn changed(&mut self) -> Result<Arc<MenuSnapshot>, FeedError> {
        tokio::select! {
            _ = self.cancel.cancelled() => Err(FeedError::Closed),
            result = self.receiver.changed() => {
                result.map_err(|_| FeedError::Closed)?;
                Ok(self.receiver.borrow_and_update().clone())
            }
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stop delivery and wait for the producer to exit
    pub async fn unsubscribe(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            tracing::error!(error = %e, "Menu subscription task failed");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
