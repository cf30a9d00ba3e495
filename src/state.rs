use std::sync::Arc;

use soupcal_core::FeedSet;
use tokio::sync::RwLock;

/// Shared application state
///
/// Holds the most recently published feeds. A refresh builds a complete
/// `FeedSet` first and then swaps the `Arc` in one write, so handlers see
/// either the old snapshot or the new one, never a mix.
#[derive(Clone, Default)]
pub struct AppState {
    feeds: Arc<RwLock<Option<Arc<FeedSet>>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot, or `None` before the first successful refresh.
    pub async fn snapshot(&self) -> Option<Arc<FeedSet>> {
        self.feeds.read().await.clone()
    }

    pub async fn publish(&self, feeds: FeedSet) {
        let feeds = Arc::new(feeds);
        *self.feeds.write().await = Some(feeds);
    }
}
