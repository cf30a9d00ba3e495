//! Location extraction from listing page markup.
//!
//! The page is read as a sequence of heading-delimited blocks. Each `h2`-`h4`
//! heading starts a location, and the sibling elements up to the next heading
//! of any level are its content.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::location::LocationRecord;
use crate::rules;

/// Elements whose text never reaches the output.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that start and end a text line.
const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "dd",
    "div",
    "dl",
    "dt",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "li",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "td",
    "th",
    "tr",
    "ul",
];

/// Split page markup into location records.
///
/// Never fails: markup without recognizable headings (or that isn't HTML at
/// all) simply yields no records.
pub fn extract(markup: &str) -> Vec<LocationRecord> {
    let document = Html::parse_document(markup);
    let scope = scope_container(&document);

    let Ok(headings) = Selector::parse(rules::LOCATION_HEADINGS) else {
        return Vec::new();
    };

    let records: Vec<LocationRecord> = scope
        .select(&headings)
        .filter_map(location_from_heading)
        .collect();

    debug!(records = records.len(), "extracted location records");
    records
}

/// First element whose id looks like the food program section, else the whole document.
fn scope_container(document: &Html) -> ElementRef<'_> {
    Selector::parse("[id]")
        .ok()
        .and_then(|with_id| {
            document.select(&with_id).find(|element| {
                element
                    .value()
                    .id()
                    .is_some_and(|id| rules::SCOPE_ID.is_match(id))
            })
        })
        .unwrap_or_else(|| document.root_element())
}

fn location_from_heading(heading: ElementRef<'_>) -> Option<LocationRecord> {
    let name = normalize_whitespace(&heading.text().collect::<Vec<_>>().join(" "));
    if name.chars().count() < rules::MIN_HEADING_CHARS {
        return None;
    }

    let content: Vec<ElementRef<'_>> = heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|element| !is_heading(element.value().name()))
        .collect();

    if content.is_empty() {
        return None;
    }

    let lines: Vec<String> = content.into_iter().flat_map(text_lines).collect();
    Some(record_from_lines(name, &lines))
}

/// Classify a block's text lines into address, schedule lines and notes.
fn record_from_lines(name: String, lines: &[String]) -> LocationRecord {
    let (schedule, other): (Vec<&String>, Vec<&String>) =
        lines.iter().partition(|line| rules::is_schedule_line(line));

    let address = lines
        .iter()
        .find_map(|line| rules::find_address(line))
        .unwrap_or_default();

    LocationRecord {
        name,
        address,
        raw_schedule_lines: schedule.into_iter().cloned().collect(),
        notes: other
            .into_iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn is_heading(name: &str) -> bool {
    matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Visible text of an element, one entry per rendered line.
fn text_lines(element: ElementRef<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    push_text(element, &mut current, &mut lines);
    flush_line(&mut current, &mut lines);
    lines
}

fn push_text(element: ElementRef<'_>, current: &mut String, lines: &mut Vec<String>) {
    let name = element.value().name();
    if SKIPPED_ELEMENTS.contains(&name) {
        return;
    }
    if name == "br" {
        flush_line(current, lines);
        return;
    }

    let is_block = BLOCK_ELEMENTS.contains(&name);
    if is_block {
        flush_line(current, lines);
    }

    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            push_text(child_element, current, lines);
        } else if let Some(text) = child.value().as_text() {
            current.push_str(text);
        }
    }

    if is_block {
        flush_line(current, lines);
    }
}

fn flush_line(current: &mut String, lines: &mut Vec<String>) {
    let line = normalize_whitespace(current);
    if !line.is_empty() {
        lines.push(line);
    }
    current.clear();
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
