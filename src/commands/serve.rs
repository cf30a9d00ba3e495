use anyhow::{Result, bail};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::Settings;
use crate::fetch::PageFetcher;
use crate::refresh;
use crate::routes;
use crate::state::AppState;

pub async fn run(settings: Settings) -> Result<()> {
    let tz = settings.timezone()?;
    let fetcher = PageFetcher::from_settings(&settings)?;
    let state = AppState::new();

    info!(
        url = %settings.scrape_url,
        timezone = %tz,
        every_minutes = settings.update_interval_minutes,
        "starting feed refresh"
    );
    let refresh = refresh::spawn(fetcher, state.clone(), tz, settings.update_interval());

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "soupcal listening");

    serve(listener, state, refresh).await
}

/// Serve feeds until the server fails or the refresh task stops.
async fn serve(listener: TcpListener, state: AppState, refresh: JoinHandle<()>) -> Result<()> {
    tokio::select! {
        served = axum::serve(listener, routes::app(state)).into_future() => served?,
        ended = refresh => {
            let reason = match ended {
                Ok(()) => "exited".to_string(),
                Err(e) => e.to_string(),
            };
            error!(reason = %reason, "feed refresh task stopped");
            bail!("feed refresh task stopped: {reason}");
        }
    }

    Ok(())
}
