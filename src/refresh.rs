//! Periodic feed regeneration.

use std::time::Duration;

use chrono::Utc;
use chrono_tz::Tz;
use soupcal_core::{SoupCalResult, regenerate};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::fetch::PageFetcher;
use crate::state::AppState;

/// Fetch the page, rebuild every feed and publish the result.
///
/// On error nothing is published and the previous feeds stay live.
pub async fn refresh_once(fetcher: &PageFetcher, state: &AppState, tz: Tz) -> SoupCalResult<()> {
    let markup = fetcher.fetch().await?;
    let feeds = regenerate(&markup, Utc::now(), tz);
    state.publish(feeds).await;
    Ok(())
}

/// Refresh immediately, then every `every`.
pub fn spawn(fetcher: PageFetcher, state: AppState, tz: Tz, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            match refresh_once(&fetcher, &state, tz).await {
                Ok(()) => info!(url = %fetcher.url(), "feeds published"),
                Err(e) => warn!(error = %e, "feed refresh failed, keeping previous feeds"),
            }
        }
    })
}
