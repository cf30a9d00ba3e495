use std::path::Path;

use anyhow::Result;
use soupcal_core::extract;

use super::load_with_spinner;
use crate::config::Settings;

/// Print the extracted location records as JSON
pub async fn run(settings: &Settings, file: Option<&Path>) -> Result<()> {
    let markup = load_with_spinner(settings, file).await?;
    let records = extract(&markup);
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
