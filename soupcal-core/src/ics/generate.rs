//! ICS feed generation.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, EventLike, Property};

use crate::recurrence::RecurringEvent;

/// Product identifier written into every feed
pub const PRODID: &str = "-//soupcal//EN";

/// Render `events` as one VCALENDAR.
///
/// `dtstamp` is written to every VEVENT so a whole feed shares one
/// generation time.
pub fn generate_feed(
    events: &[RecurringEvent],
    calendar_name: &str,
    tz: Tz,
    dtstamp: DateTime<Utc>,
) -> String {
    let mut cal = Calendar::new();
    cal.name(calendar_name);
    cal.timezone(tz.name());

    for event in events {
        cal.push(to_ics_event(event, dtstamp));
    }

    let cal = cal.done();
    strip_ics_bloat(&cal.to_string())
}

fn to_ics_event(event: &RecurringEvent, dtstamp: DateTime<Utc>) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid());
    ics_event.summary(&event.title);
    ics_event.add_property("DTSTAMP", dtstamp.format("%Y%m%dT%H%M%SZ").to_string());

    add_zoned_datetime(&mut ics_event, "DTSTART", &event.start);
    add_zoned_datetime(&mut ics_event, "DTEND", &event.end);

    // Open-ended weekly recurrence: no COUNT or UNTIL
    ics_event.add_property("RRULE", event.rrule());

    if !event.location.is_empty() {
        ics_event.location(&event.location);
    }

    if !event.description.is_empty() {
        ics_event.description(&event.description);
    }

    ics_event.done()
}

/// Add a local datetime with a TZID parameter
fn add_zoned_datetime(ics_event: &mut icalendar::Event, name: &str, time: &DateTime<Tz>) {
    let mut prop = Property::new(name, time.format("%Y%m%dT%H%M%S").to_string());
    prop.add_parameter("TZID", time.timezone().name());
    ics_event.append_property(prop);
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with our own
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationRecord;
    use crate::recurrence::build_events;
    use chrono::TimeZone;
    use chrono_tz::America::Chicago;

    fn make_test_events(address: &str, notes: &str) -> Vec<RecurringEvent> {
        let record = LocationRecord {
            name: "Test Pantry".to_string(),
            address: address.to_string(),
            raw_schedule_lines: vec![
                "Tuesdays 12:00 PM - 2:00 PM".to_string(),
                "Mon & Thu 9:00 AM - 11:00 AM".to_string(),
            ],
            notes: notes.to_string(),
        };
        let now = Utc.with_ymd_and_hms(2026, 10, 15, 15, 0, 0).unwrap();
        build_events(&record, now, Chicago)
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 15, 15, 0, 0).unwrap()
    }

    #[test]
    fn test_generate_feed_one_vevent_per_event() {
        let events = make_test_events("123 Main St", "Notes here");
        let ics = generate_feed(&events, "Food Pantry", Chicago, stamp());

        let vevent_count = ics.lines().filter(|l| *l == "BEGIN:VEVENT").count();
        assert_eq!(vevent_count, 2, "ICS:\n{}", ics);

        assert!(ics.contains("RRULE:FREQ=WEEKLY;BYDAY=TU\r\n"), "ICS:\n{}", ics);
        assert!(ics.contains("RRULE:FREQ=WEEKLY;BYDAY=MO,TH\r\n"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_generate_feed_zoned_start_and_end() {
        let events = make_test_events("123 Main St", "Notes here");
        let ics = generate_feed(&events, "Food Pantry", Chicago, stamp());

        assert!(
            ics.contains("DTSTART;TZID=America/Chicago:20261020T120000"),
            "DTSTART should carry TZID. ICS:\n{}",
            ics
        );
        assert!(
            ics.contains("DTEND;TZID=America/Chicago:20261020T140000"),
            "DTEND should carry TZID. ICS:\n{}",
            ics
        );
        assert!(ics.contains("DTSTAMP:20261015T150000Z"));
    }

    #[test]
    fn test_generate_feed_calendar_metadata() {
        let ics = generate_feed(&[], "Soup Kitchen", Chicago, stamp());

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.contains("PRODID:-//soupcal//EN\r\n"));
        assert!(ics.contains("X-WR-CALNAME:Soup Kitchen"));
        assert!(!ics.contains("CALSCALE"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }

    #[test]
    fn test_generate_feed_omits_empty_location_and_description() {
        let events = make_test_events("", "");
        let ics = generate_feed(&events, "Food Pantry", Chicago, stamp());

        assert!(!ics.lines().any(|l| l.starts_with("LOCATION")), "ICS:\n{}", ics);
        assert!(!ics.lines().any(|l| l.starts_with("DESCRIPTION")), "ICS:\n{}", ics);
    }

    #[test]
    fn test_generate_feed_stable_uids() {
        let events = make_test_events("123 Main St", "Notes here");
        let first = generate_feed(&events, "Food Pantry", Chicago, stamp());
        let second = generate_feed(&events, "Food Pantry", Chicago, stamp());

        let uids = |ics: &str| -> Vec<String> {
            ics.lines()
                .filter(|l| l.starts_with("UID:"))
                .map(String::from)
                .collect()
        };
        assert_eq!(uids(&first).len(), 2);
        assert_eq!(uids(&first), uids(&second));
    }
}
