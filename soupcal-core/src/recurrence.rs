//! Weekly recurring events built from location schedules.
//!
//! Each interpretable schedule line becomes one event that starts at the next
//! occurrence of its earliest weekday and repeats weekly on every weekday the
//! line names.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use chrono_tz::Tz;
use rrule::RRuleSet;
use tracing::debug;
use uuid::Uuid;

use crate::error::{SoupCalError, SoupCalResult};
use crate::location::LocationRecord;
use crate::schedule::{self, ScheduleRule, Weekday, WeekdaySet};

/// Recurrence frequency. Schedules on the listing page are always weekly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Weekly,
}

impl Frequency {
    pub fn as_rrule_str(self) -> &'static str {
        match self {
            Frequency::Weekly => "WEEKLY",
        }
    }
}

/// A recurring calendar event anchored at its first upcoming occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringEvent {
    /// Location name and the schedule line it came from
    pub title: String,
    pub location: String,
    pub description: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub weekdays: WeekdaySet,
    pub frequency: Frequency,
}

impl RecurringEvent {
    /// Build the event for one interpreted schedule line.
    pub fn new(
        record: &LocationRecord,
        raw_line: &str,
        rule: &ScheduleRule,
        reference_now: DateTime<Utc>,
        tz: Tz,
    ) -> Self {
        let today = reference_now.with_timezone(&tz).date_naive();
        let date = anchor_date(today, rule.anchor_weekday());
        // End keeps the rule's duration even when the start was shifted out of a DST gap
        let start = localize(tz, date, rule.start());
        let end = start + (rule.end() - rule.start());

        RecurringEvent {
            title: format!("{} - {}", record.name, raw_line),
            location: record.address.clone(),
            description: record.notes.clone(),
            start,
            end,
            weekdays: rule.weekdays().clone(),
            frequency: Frequency::Weekly,
        }
    }

    /// RRULE value, e.g. `FREQ=WEEKLY;BYDAY=MO,WE`.
    pub fn rrule(&self) -> String {
        format!(
            "FREQ={};BYDAY={}",
            self.frequency.as_rrule_str(),
            schedule::weekday_codes(&self.weekdays)
        )
    }

    /// Stable identifier derived from the event's content.
    ///
    /// Regenerating feeds from an unchanged page yields the same UIDs, so
    /// subscribed clients update events in place instead of duplicating them.
    pub fn uid(&self) -> String {
        let key = format!("{}|{}|{}", self.title, self.location, self.rrule());
        format!("{}@soupcal", Uuid::new_v5(&Uuid::NAMESPACE_URL, key.as_bytes()))
    }

    pub fn timezone(&self) -> Tz {
        self.start.timezone()
    }

    /// Expand the first `limit` occurrence start times.
    pub fn occurrences(&self, limit: u16) -> SoupCalResult<Vec<DateTime<Tz>>> {
        let tz = self.timezone();
        let rrule_str = format!(
            "DTSTART;TZID={}:{}\nRRULE:{}",
            tz.name(),
            self.start.format("%Y%m%dT%H%M%S"),
            self.rrule()
        );

        let rrule_set: RRuleSet = rrule_str.parse().map_err(|e| {
            SoupCalError::Recurrence(format!(
                "Failed to parse RRULE for event '{}': {}",
                self.title, e
            ))
        })?;

        Ok(rrule_set
            .all(limit)
            .dates
            .iter()
            .map(|dt| dt.with_timezone(&tz))
            .collect())
    }
}

/// Build one recurring event per interpretable schedule line of `record`.
///
/// Lines without a weekday or a valid time range are skipped.
pub fn build_events(
    record: &LocationRecord,
    reference_now: DateTime<Utc>,
    tz: Tz,
) -> Vec<RecurringEvent> {
    record
        .raw_schedule_lines
        .iter()
        .filter_map(|line| match schedule::interpret_line(line) {
            Some(rule) => Some(RecurringEvent::new(record, line, &rule, reference_now, tz)),
            None => {
                debug!(
                    location = %record.name,
                    line = %line,
                    "skipping uninterpretable schedule line"
                );
                None
            }
        })
        .collect()
}

/// First date on or after `today` that falls on `weekday`.
pub fn anchor_date(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let target = weekday.to_chrono().num_days_from_monday() as i64;
    let current = today.weekday().num_days_from_monday() as i64;
    let days_ahead = (target - current).rem_euclid(7);
    today + Duration::days(days_ahead)
}

/// Attach `tz` to a local date and time.
///
/// Ambiguous times (DST fall-back) take the earlier instant; times skipped by
/// a DST jump move forward an hour.
fn localize(tz: Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Tz> {
    let naive = NaiveDateTime::new(date, time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let shifted = naive + Duration::hours(1);
            tz.from_local_datetime(&shifted)
                .earliest()
                .unwrap_or_else(|| tz.from_utc_datetime(&naive))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use chrono_tz::America::Chicago;

    fn record(lines: &[&str]) -> LocationRecord {
        LocationRecord {
            name: "Test Pantry".to_string(),
            address: "123 Main St".to_string(),
            raw_schedule_lines: lines.iter().map(|l| l.to_string()).collect(),
            notes: "Notes here".to_string(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Thursday 2026-10-15, 15:00 UTC is 10:00 in Chicago
    fn thursday_morning() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 15, 15, 0, 0).unwrap()
    }

    #[test]
    fn test_anchor_date_same_day_is_zero_days_ahead() {
        assert_eq!(anchor_date(date(2026, 10, 15), Weekday::Thursday), date(2026, 10, 15));
    }

    #[test]
    fn test_anchor_date_wraps_to_next_week() {
        assert_eq!(anchor_date(date(2026, 10, 15), Weekday::Monday), date(2026, 10, 19));
        assert_eq!(anchor_date(date(2026, 10, 15), Weekday::Wednesday), date(2026, 10, 21));
        assert_eq!(anchor_date(date(2026, 10, 18), Weekday::Sunday), date(2026, 10, 18));
    }

    #[test]
    fn test_build_events_two_lines() {
        let rec = record(&["Tuesdays 12:00 PM - 2:00 PM", "Wed 9:00 AM - 11:00 AM"]);
        let events = build_events(&rec, thursday_morning(), Chicago);

        assert_eq!(events.len(), 2);

        let tuesday = &events[0];
        assert_eq!(tuesday.title, "Test Pantry - Tuesdays 12:00 PM - 2:00 PM");
        assert_eq!(tuesday.location, "123 Main St");
        assert_eq!(tuesday.description, "Notes here");
        assert_eq!(tuesday.start, Chicago.with_ymd_and_hms(2026, 10, 20, 12, 0, 0).unwrap());
        assert_eq!(tuesday.end, Chicago.with_ymd_and_hms(2026, 10, 20, 14, 0, 0).unwrap());
        assert_eq!(tuesday.rrule(), "FREQ=WEEKLY;BYDAY=TU");

        let wednesday = &events[1];
        assert_eq!(wednesday.start, Chicago.with_ymd_and_hms(2026, 10, 21, 9, 0, 0).unwrap());
        assert_eq!(wednesday.rrule(), "FREQ=WEEKLY;BYDAY=WE");
        assert_ne!(tuesday.weekdays, wednesday.weekdays);
    }

    #[test]
    fn test_build_events_uses_timezone_date_not_utc_date() {
        // 2026-10-16 03:00 UTC is still Thursday evening in Chicago
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 3, 0, 0).unwrap();
        let events = build_events(&record(&["Thursday 6:00 PM - 8:00 PM"]), now, Chicago);

        assert_eq!(events[0].start.date_naive(), date(2026, 10, 15));
    }

    #[test]
    fn test_build_events_multi_day_line_is_one_event() {
        let events = build_events(&record(&["Mon, Wed, Fri 10am - 12pm"]), thursday_morning(), Chicago);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].rrule(), "FREQ=WEEKLY;BYDAY=MO,WE,FR");
        assert_eq!(events[0].start.date_naive(), date(2026, 10, 19));
        assert_eq!(events[0].frequency, Frequency::Weekly);
    }

    #[test]
    fn test_build_events_skips_unparseable_lines() {
        let rec = record(&["Mon-Fri 9-5", "Call for hours", "Sat 10:00 AM - 12:00 PM"]);
        let events = build_events(&rec, thursday_morning(), Chicago);
        assert_eq!(events.len(), 1);

        let none = build_events(&record(&["Mon-Fri 9-5"]), thursday_morning(), Chicago);
        assert!(none.is_empty());
    }

    #[test]
    fn test_build_events_is_idempotent() {
        let rec = record(&["Tuesdays 12:00 PM - 2:00 PM", "Sun 1pm - 3pm"]);
        let first = build_events(&rec, thursday_morning(), Chicago);
        let second = build_events(&rec, thursday_morning(), Chicago);
        assert_eq!(first, second);
        assert_eq!(first[0].uid(), second[0].uid());
    }

    #[test]
    fn test_first_occurrence_invariants() {
        let now = thursday_morning();
        let today = now.with_timezone(&Chicago).date_naive();
        let rec = record(&[
            "Monday 9am - 10am",
            "Thu 7:00 AM - 8:00 AM",
            "Saturday and Sunday 1:00 PM - 2:00 PM",
        ]);

        for event in build_events(&rec, now, Chicago) {
            let start_date = event.start.date_naive();
            assert!(start_date >= today);
            assert!(event.weekdays.contains(&Weekday::from_chrono(start_date.weekday())));
            assert!(event.start < event.end);
        }
    }

    #[test]
    fn test_localize_spring_forward_gap() {
        // 2027-03-14 02:30 does not exist in Chicago
        let dt = localize(Chicago, date(2027, 3, 14), NaiveTime::from_hms_opt(2, 30, 0).unwrap());
        assert_eq!(dt.hour(), 3);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_build_events_keeps_duration_across_spring_forward() {
        // 2027-03-14 00:30 CST, a Sunday; 02:30 local is skipped that night
        let now = Utc.with_ymd_and_hms(2027, 3, 14, 6, 30, 0).unwrap();
        let events = build_events(&record(&["Sun 2:30 AM - 3:00 AM"]), now, Chicago);

        let event = &events[0];
        assert_eq!(event.start.date_naive(), date(2027, 3, 14));
        assert_eq!((event.start.hour(), event.start.minute()), (3, 30));
        assert!(event.start < event.end);
        assert_eq!(event.end - event.start, Duration::minutes(30));
    }

    #[test]
    fn test_localize_fall_back_takes_earlier() {
        let dt = localize(Chicago, date(2026, 11, 1), NaiveTime::from_hms_opt(1, 30, 0).unwrap());
        assert_eq!(dt.with_timezone(&Utc).hour(), 6);
    }

    #[test]
    fn test_occurrences_follow_weekdays() {
        let events = build_events(&record(&["Tue & Thu 5:00 PM - 6:00 PM"]), thursday_morning(), Chicago);
        let occurrences = events[0].occurrences(6).unwrap();

        assert_eq!(occurrences.len(), 6);
        assert_eq!(occurrences[0], events[0].start);
        for occurrence in &occurrences {
            let day = Weekday::from_chrono(occurrence.weekday());
            assert!(events[0].weekdays.contains(&day));
            assert_eq!(occurrence.hour(), 17);
        }
    }

    #[test]
    fn test_uid_differs_per_line() {
        let events = build_events(
            &record(&["Tuesdays 12:00 PM - 2:00 PM", "Wed 9:00 AM - 11:00 AM"]),
            thursday_morning(),
            Chicago,
        );
        assert_ne!(events[0].uid(), events[1].uid());
        assert!(events[0].uid().ends_with("@soupcal"));
    }
}
