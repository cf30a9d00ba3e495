//! Text heuristics shared by extraction and schedule interpretation.
//!
//! Each rule is a named value so the vocabulary and patterns can be extended
//! without touching the control flow in `extract` or `schedule`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schedule::Weekday;

/// Headings shorter than this (in characters) are treated as decoration.
pub const MIN_HEADING_CHARS: usize = 3;

/// Heading levels that start a location block.
pub const LOCATION_HEADINGS: &str = "h2, h3, h4";

/// Every recognized weekday spelling (lowercase) and the day it names.
pub const WEEKDAY_VOCABULARY: &[(&str, Weekday)] = &[
    ("monday", Weekday::Monday),
    ("mon", Weekday::Monday),
    ("tuesday", Weekday::Tuesday),
    ("tues", Weekday::Tuesday),
    ("tue", Weekday::Tuesday),
    ("wednesday", Weekday::Wednesday),
    ("wed", Weekday::Wednesday),
    ("thursday", Weekday::Thursday),
    ("thurs", Weekday::Thursday),
    ("thur", Weekday::Thursday),
    ("thu", Weekday::Thursday),
    ("friday", Weekday::Friday),
    ("fri", Weekday::Friday),
    ("saturday", Weekday::Saturday),
    ("sat", Weekday::Saturday),
    ("sunday", Weekday::Sunday),
    ("sun", Weekday::Sunday),
];

/// Whole-word weekday mention with an optional plural "s".
/// Capture group 1 holds the vocabulary word.
pub static WEEKDAY_WORD: Lazy<Regex> = Lazy::new(|| {
    let mut words: Vec<&str> = WEEKDAY_VOCABULARY.iter().map(|(word, _)| *word).collect();
    // Alternation is leftmost-first, so longer spellings must come first
    words.sort_by_key(|word| std::cmp::Reverse(word.len()));
    Regex::new(&format!(r"(?i)\b({})s?\b", words.join("|")))
        .expect("Failed to compile WEEKDAY_WORD regex")
});

/// `H:MM` anywhere in a line marks it as a schedule line.
pub static CLOCK_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,2}:\d{2}").expect("Failed to compile CLOCK_TIME regex"));

/// A single 12-hour clock time with a required am/pm marker, e.g. `9am`, `12:30 p.m.`
pub static MERIDIEM_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(\d{1,2})(?::(\d{2}))?\s*([ap])\.?m\.?\s*$")
        .expect("Failed to compile MERIDIEM_TIME regex")
});

/// Same shape as `MERIDIEM_TIME` but unanchored, for spotting times inside prose.
pub static MERIDIEM_TIME_IN_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d{1,2}(?::\d{2})?\s*[ap]\.?m\b")
        .expect("Failed to compile MERIDIEM_TIME_IN_TEXT regex")
});

/// `<time> - <time>` where both sides carry an am/pm marker.
/// Groups 1 and 2 are the start and end tokens.
pub static TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    let time = r"\d{1,2}(?::\d{2})?\s*[ap]\.?m\.?";
    Regex::new(&format!(r"(?i)\b({time})\s*[-\u{{2013}}\u{{2014}}]\s*({time})"))
        .expect("Failed to compile TIME_RANGE regex")
});

/// House number of 1-5 digits followed by street-ish text.
pub static ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{1,5} [\w .#,-]+").expect("Failed to compile ADDRESS regex")
});

/// Where an `ADDRESS` match can begin.
pub static HOUSE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,5} ").expect("Failed to compile HOUSE_NUMBER regex"));

/// An am/pm marker right after a number, as in the " PM" of "2 PM".
pub static MERIDIEM_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*[ap]\.?m\b").expect("Failed to compile MERIDIEM_SUFFIX regex")
});

/// Element ids that likely wrap the food program section.
pub static SCOPE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)food|pantri").expect("Failed to compile SCOPE_ID regex"));

/// Look up a vocabulary word (any case, without plural "s").
pub fn weekday_for(word: &str) -> Option<Weekday> {
    let word = word.to_lowercase();
    WEEKDAY_VOCABULARY
        .iter()
        .find(|(spelling, _)| *spelling == word)
        .map(|(_, day)| *day)
}

/// A line is a schedule candidate if it names a weekday or shows an `H:MM` time.
pub fn is_schedule_line(line: &str) -> bool {
    WEEKDAY_WORD.is_match(line) || CLOCK_TIME.is_match(line)
}

/// First address-looking match in the line.
///
/// Numbers that belong to a clock time (`10:00 AM`, `9 AM`, the `5` of `9-5`)
/// never start an address, and the match is cut where a weekday or time
/// begins so "100 Market St - Mondays 10 AM" yields `100 Market St`.
pub fn find_address(line: &str) -> Option<String> {
    HOUSE_NUMBER
        .find_iter(line)
        .filter(|number| !is_clock_fragment(line, number.start(), number.end()))
        .find_map(|number| {
            let found = ADDRESS
                .find_at(line, number.start())
                .filter(|found| found.start() == number.start())?;
            let text = found.as_str();
            let street_start = number.as_str().len();

            let cut = [&*WEEKDAY_WORD, &*CLOCK_TIME, &*MERIDIEM_TIME_IN_TEXT]
                .into_iter()
                .filter_map(|rule| rule.find(&text[street_start..]))
                .map(|m| street_start + m.start())
                .min()
                .unwrap_or(text.len());

            let address = text[..cut].trim_end_matches([' ', ',', '-']);
            (address.len() > street_start).then(|| address.to_string())
        })
}

fn is_clock_fragment(line: &str, start: usize, end: usize) -> bool {
    let after_separator = line[..start]
        .chars()
        .next_back()
        .is_some_and(|c| matches!(c, ':' | '-' | '\u{2013}' | '\u{2014}'));
    after_separator || MERIDIEM_SUFFIX.is_match(&line[end..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_word_prefers_full_spelling() {
        let caps = WEEKDAY_WORD.captures("Open Tuesdays only").unwrap();
        assert_eq!(&caps[1], "Tuesday");
        assert_eq!(weekday_for(&caps[1]), Some(Weekday::Tuesday));
    }

    #[test]
    fn test_weekday_word_requires_whole_word() {
        assert!(!WEEKDAY_WORD.is_match("Monthly distribution"));
        assert!(!WEEKDAY_WORD.is_match("sunshine"));
        assert!(WEEKDAY_WORD.is_match("THUR 5pm"));
    }

    #[test]
    fn test_every_vocabulary_word_resolves() {
        for (word, day) in WEEKDAY_VOCABULARY {
            assert_eq!(weekday_for(&word.to_uppercase()), Some(*day), "{word}");
            assert!(WEEKDAY_WORD.is_match(word), "{word} should match");
        }
    }

    #[test]
    fn test_schedule_line_detection() {
        assert!(is_schedule_line("Wed 9:00 AM - 11:00 AM"));
        assert!(is_schedule_line("Doors open at 8:30"));
        assert!(is_schedule_line("Closed on Sundays"));
        assert!(!is_schedule_line("Bring a photo ID"));
        assert!(!is_schedule_line("Call 314-555-0100"));
    }

    #[test]
    fn test_time_range_groups() {
        let caps = TIME_RANGE.captures("Tue 12:00 PM - 2:00 p.m.").unwrap();
        assert_eq!(&caps[1], "12:00 PM");
        assert_eq!(&caps[2], "2:00 p.m.");

        let caps = TIME_RANGE.captures("Sat 9am\u{2013}11am").unwrap();
        assert_eq!(&caps[1], "9am");
        assert_eq!(&caps[2], "11am");

        assert!(TIME_RANGE.captures("Mon-Fri 9-5").is_none());
    }

    #[test]
    fn test_find_address() {
        assert_eq!(
            find_address("1234 Main St., Saint Louis, MO 63103").as_deref(),
            Some("1234 Main St., Saint Louis, MO 63103")
        );
        assert_eq!(find_address("Call ahead, -").as_deref(), None);
    }

    #[test]
    fn test_find_address_skips_clock_times() {
        assert_eq!(find_address("9 AM - 11 AM"), None);
        assert_eq!(find_address("Tuesdays 12:00 PM - 2:00 PM"), None);
        assert_eq!(find_address("Mon-Fri 9-5 by appointment"), None);
    }

    #[test]
    fn test_find_address_shares_line_with_schedule() {
        assert_eq!(
            find_address("4500 Delmar Blvd, doors open 9am").as_deref(),
            Some("4500 Delmar Blvd, doors open")
        );
        assert_eq!(
            find_address("100 Market St - Mondays 10:00 AM - 12:00 PM").as_deref(),
            Some("100 Market St")
        );
        assert_eq!(
            find_address("Open 9 AM at 77 Chouteau Ave").as_deref(),
            Some("77 Chouteau Ave")
        );
    }

    #[test]
    fn test_scope_id() {
        assert!(SCOPE_ID.is_match("food-programs"));
        assert!(SCOPE_ID.is_match("Pantries"));
        assert!(!SCOPE_ID.is_match("main-content"));
    }
}
