pub mod generate;
pub mod preview;
pub mod scrape;
pub mod serve;

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use soupcal_core::SoupCalResult;

use crate::config::Settings;
use crate::fetch::load_markup;

/// Load the page markup, showing a spinner on stderr while it downloads
async fn load_with_spinner(settings: &Settings, file: Option<&Path>) -> SoupCalResult<String> {
    let source = match file {
        Some(path) => path.display().to_string(),
        None => settings.scrape_url.clone(),
    };

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["-", "\\", "|", "/"])
        .template("{msg} {spinner}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Loading {source}"));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let markup = load_markup(file, settings).await;
    spinner.finish_and_clear();
    markup
}
