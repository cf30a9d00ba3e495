use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use soupcal_core::{FeedCategory, regenerate};

use super::load_with_spinner;
use crate::config::Settings;

/// Print one category feed as ICS
pub async fn run(settings: &Settings, category: FeedCategory, file: Option<&Path>) -> Result<()> {
    let tz = settings.timezone()?;
    let markup = load_with_spinner(settings, file).await?;

    let feeds = regenerate(&markup, Utc::now(), tz);
    let ics = feeds
        .feed(category)
        .with_context(|| format!("No feed generated for '{}'", category))?;

    print!("{}", ics);
    Ok(())
}
