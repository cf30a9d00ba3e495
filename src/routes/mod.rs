pub mod feeds;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full HTTP application
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(feeds::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
