// ── State subscriptions ──
//
// Consumers watch committed snapshots instead of polling the store.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::InventoryState;

/// A subscription to the store's committed snapshots.
///
/// Provides both point-in-time snapshot access and change notification
/// via `changed()` or by converting to a `Stream`.
pub struct StateStream {
    current: Arc<InventoryState>,
    receiver: watch::Receiver<Arc<InventoryState>>,
}

impl StateStream {
    pub(crate) fn new(mut receiver: watch::Receiver<Arc<InventoryState>>) -> Self {
        let current = receiver.borrow_and_update().clone();
        Self { current, receiver }
    }

    /// The snapshot seen at creation or at the last `changed()`.
    pub fn current(&self) -> &Arc<InventoryState> {
        &self.current
    }

    /// The latest committed snapshot.
    pub fn latest(&self) -> Arc<InventoryState> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next commit. Returns `None` once the store is dropped.
    pub async fn changed(&mut self) -> Option<Arc<InventoryState>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = Arc::clone(&snap);
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    ///
    /// The stream yields the current snapshot first, then one item per
    /// observed commit.
    pub fn into_stream(self) -> StateWatchStream {
        StateWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct StateWatchStream {
    inner: WatchStream<Arc<InventoryState>>,
}

impl Stream for StateWatchStream {
    type Item = Arc<InventoryState>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
