use shared::MenuSnapshot;
use std::sync::Arc;
use tokio::sync::watch;

/// Latest-snapshot channel with revision numbering
///
/// Every published snapshot gets the previous revision + 1 (the first one
/// gets 1), so two different snapshots never share a revision.
#[derive(Debug)]
pub struct SnapshotPublisher {
    tx: watch::Sender<Arc<MenuSnapshot>>,
}

impl SnapshotPublisher {
    pub fn new(initial: MenuSnapshot) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(initial.with_revision(1)));
        Self { tx }
    }

    /// Publish unconditionally; returns the assigned revision
    pub fn publish(&self, snapshot: MenuSnapshot) -> u64 {
        let mut revision = 0;
        self.tx.send_modify(|current| {
            revision = current.revision + 1;
            *current = Arc::new(snapshot.with_revision(revision));
        });
        revision
    }

    /// Publish only when the content differs from the current snapshot
    pub fn publish_if_changed(&self, snapshot: MenuSnapshot) -> Option<u64> {
        let mut revision = None;
        self.tx.send_if_modified(|current| {
            if current.same_content(&snapshot) {
                return false;
            }
            let next = current.revision + 1;
            *current = Arc::new(snapshot.with_revision(next));
            revision = Some(next);
            true
        });
        revision
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<MenuSnapshot>> {
        self.tx.subscribe()
    }

    pub fn latest(&self) -> Arc<MenuSnapshot> {
        self.tx.borrow().clone()
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
