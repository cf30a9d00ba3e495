//! Schedule line interpretation.
//!
//! A schedule line like `"Tuesdays 12:00 PM - 2:00 PM"` is read as a set of
//! weekdays plus one clock-time window. Lines missing either half yield no
//! rule; callers drop them instead of treating them as errors.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveTime;

use crate::rules;

/// Day of week, ordered Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Canonical weekday set. Iteration order is always Monday to Sunday.
pub type WeekdaySet = BTreeSet<Weekday>;

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Two-letter code used in RRULE BYDAY lists
    pub fn code(self) -> &'static str {
        match self {
            Weekday::Monday => "MO",
            Weekday::Tuesday => "TU",
            Weekday::Wednesday => "WE",
            Weekday::Thursday => "TH",
            Weekday::Friday => "FR",
            Weekday::Saturday => "SA",
            Weekday::Sunday => "SU",
        }
    }

    pub fn to_chrono(self) -> chrono::Weekday {
        match self {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
            Weekday::Sunday => chrono::Weekday::Sun,
        }
    }

    pub fn from_chrono(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Render a weekday set as a comma-separated code list (`MO,WE,FR`).
pub fn weekday_codes(days: &WeekdaySet) -> String {
    days.iter().map(|day| day.code()).collect::<Vec<_>>().join(",")
}

/// A weekly availability window interpreted from one schedule line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRule {
    weekdays: WeekdaySet,
    start: NaiveTime,
    end: NaiveTime,
}

impl ScheduleRule {
    /// Returns `None` unless `weekdays` is non-empty and `start < end`.
    pub fn new(weekdays: WeekdaySet, start: NaiveTime, end: NaiveTime) -> Option<Self> {
        if weekdays.is_empty() || start >= end {
            return None;
        }
        Some(ScheduleRule {
            weekdays,
            start,
            end,
        })
    }

    pub fn weekdays(&self) -> &WeekdaySet {
        &self.weekdays
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Earliest active day in Monday-first order.
    pub fn anchor_weekday(&self) -> Weekday {
        *self
            .weekdays
            .first()
            .expect("ScheduleRule weekdays are non-empty by construction")
    }
}

/// Collect every weekday mentioned in `text`.
pub fn interpret_weekdays(text: &str) -> WeekdaySet {
    rules::WEEKDAY_WORD
        .captures_iter(text)
        .filter_map(|caps| rules::weekday_for(&caps[1]))
        .collect()
}

/// Find the first `<time> - <time>` range in `text`.
///
/// Both sides need an am/pm marker; `"9-5"` is not a range.
pub fn interpret_time_range(text: &str) -> Option<(NaiveTime, NaiveTime)> {
    let caps = rules::TIME_RANGE.captures(text)?;
    let start = parse_clock_time(&caps[1])?;
    let end = parse_clock_time(&caps[2])?;
    Some((start, end))
}

/// Interpret a whole schedule line, or `None` if it lacks days or a valid window.
pub fn interpret_line(text: &str) -> Option<ScheduleRule> {
    let weekdays = interpret_weekdays(text);
    if weekdays.is_empty() {
        return None;
    }
    let (start, end) = interpret_time_range(text)?;
    ScheduleRule::new(weekdays, start, end)
}

/// Parse a 12-hour clock token such as `9am`, `12:00 PM` or `4:30 p.m.`.
fn parse_clock_time(token: &str) -> Option<NaiveTime> {
    let caps = rules::MERIDIEM_TIME.captures(token)?;

    let hour: u32 = caps[1].parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    // 12 AM is midnight, 12 PM is noon
    let hour = match caps[3].to_ascii_lowercase().as_str() {
        "p" => hour % 12 + 12,
        _ => hour % 12,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}
