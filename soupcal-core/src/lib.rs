//! Core pipeline for soupcal.
//!
//! Turns a food program listing page into weekly recurring calendar events:
//! - `extract` splits page markup into `LocationRecord`s
//! - `schedule` interprets free-text schedule lines into `ScheduleRule`s
//! - `recurrence` anchors each rule at its next occurrence as a `RecurringEvent`
//! - `category`, `ics` and `feed` group and serialize events into ICS feeds
//!
//! Everything in this crate is a pure function of its inputs; fetching,
//! caching and serving feeds live in the `soupcal` binary.

pub mod category;
pub mod error;
pub mod extract;
pub mod feed;
pub mod ics;
pub mod location;
pub mod recurrence;
pub mod rules;
pub mod schedule;

pub use category::FeedCategory;
pub use error::{SoupCalError, SoupCalResult};
pub use extract::extract;
pub use feed::{FeedSet, regenerate};
pub use location::LocationRecord;
pub use recurrence::{Frequency, RecurringEvent, build_events};
pub use schedule::{ScheduleRule, Weekday, WeekdaySet, interpret_line};
