//! Feed regeneration.
//!
//! `regenerate` is the whole pipeline as one pure function: markup in,
//! one ICS text per feed category out.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::info;

use crate::category::FeedCategory;
use crate::extract::extract;
use crate::ics::generate_feed;
use crate::location::LocationRecord;
use crate::recurrence::{RecurringEvent, build_events};

/// A complete, immutable set of generated feeds.
#[derive(Debug, Clone)]
pub struct FeedSet {
    pub generated_at: DateTime<Utc>,
    pub records: usize,
    pub events: usize,
    feeds: BTreeMap<FeedCategory, String>,
}

impl FeedSet {
    /// ICS text for `category`
    pub fn feed(&self, category: FeedCategory) -> Option<&str> {
        self.feeds.get(&category).map(String::as_str)
    }
}

/// Events for `records`, in record order then schedule line order.
pub fn events_for<'a>(
    records: impl IntoIterator<Item = &'a LocationRecord>,
    reference_now: DateTime<Utc>,
    tz: Tz,
) -> Vec<RecurringEvent> {
    records
        .into_iter()
        .flat_map(|record| build_events(record, reference_now, tz))
        .collect()
}

/// Run extraction, interpretation and serialization for every feed category.
pub fn regenerate(markup: &str, reference_now: DateTime<Utc>, tz: Tz) -> FeedSet {
    let records = extract(markup);
    let all_events = events_for(&records, reference_now, tz);

    let feeds = FeedCategory::ALL
        .into_iter()
        .map(|category| {
            let events = events_for(category.select(&records), reference_now, tz);
            let ics = generate_feed(&events, category.display_name(), tz, reference_now);
            (category, ics)
        })
        .collect();

    info!(
        records = records.len(),
        events = all_events.len(),
        "regenerated feeds"
    );

    FeedSet {
        generated_at: reference_now,
        records: records.len(),
        events: all_events.len(),
        feeds,
    }
}
