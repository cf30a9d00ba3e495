//! Terminal rendering for soupcal-core types.
//!
//! Extension traits that add colored output using owo_colors.

use chrono::DateTime;
use chrono_tz::Tz;
use owo_colors::OwoColorize;
use soupcal_core::{LocationRecord, RecurringEvent};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for LocationRecord {
    fn render(&self) -> String {
        let mut lines = vec![format!("📍 {}", self.name.bold())];
        if !self.address.is_empty() {
            lines.push(format!("   {}", self.address.dimmed()));
        }
        if self.raw_schedule_lines.is_empty() {
            lines.push(format!("   {}", "no schedule lines".yellow()));
        }
        lines.join("\n")
    }
}

impl Render for RecurringEvent {
    fn render(&self) -> String {
        format!(
            "   {} {} {}",
            "↻".green(),
            self.title,
            format!(
                "{}-{} {}",
                self.start.format("%H:%M"),
                self.end.format("%H:%M"),
                self.rrule()
            )
            .dimmed()
        )
    }
}

/// One upcoming occurrence line
pub fn render_occurrence(start: &DateTime<Tz>) -> String {
    format!("      {}", start.format("%a %Y-%m-%d %H:%M %Z").dimmed())
}
