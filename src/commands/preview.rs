use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use soupcal_core::{build_events, extract};

use super::load_with_spinner;
use crate::config::Settings;
use crate::render::{Render, render_occurrence};

/// Show each location's events and their next `count` occurrences
pub async fn run(settings: &Settings, file: Option<&Path>, count: u16) -> Result<()> {
    let tz = settings.timezone()?;

    let markup = load_with_spinner(settings, file).await?;
    let records = extract(&markup);
    let now = Utc::now();

    for (i, record) in records.iter().enumerate() {
        println!("{}", record.render());

        for event in build_events(record, now, tz) {
            println!("{}", event.render());
            match event.occurrences(count) {
                Ok(starts) => starts.iter().for_each(|s| println!("{}", render_occurrence(s))),
                Err(e) => println!("      {}", e.to_string().red()),
            }
        }

        // Add spacing between locations (but not after the last one)
        if i < records.len() - 1 {
            println!();
        }
    }

    Ok(())
}
