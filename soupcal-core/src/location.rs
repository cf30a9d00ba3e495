//! Location records recovered from the listing page.

use serde::Serialize;

/// One organization or program block found under a page heading.
///
/// Fields the page doesn't provide are left empty rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationRecord {
    /// Heading text (never empty)
    pub name: String,
    /// Best-effort street address, empty if none was recognized
    pub address: String,
    /// Lines that mention a weekday or a clock time, in page order
    pub raw_schedule_lines: Vec<String>,
    /// Remaining text lines joined with newlines
    pub notes: String,
}
