//! ICS feed generation.
//!
//! This module renders recurring events as an RFC 5545 calendar.

mod generate;

pub use generate::{PRODID, generate_feed};
