//! Index page and calendar feed endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use soupcal_core::FeedCategory;

use crate::state::AppState;

const ICS_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/calendars/{file}", get(calendar_feed))
}

/// GET / - Subscription links for every feed
async fn index() -> Html<String> {
    let links: String = FeedCategory::ALL
        .iter()
        .map(|category| {
            format!(
                "  <li><a href=\"/calendars/{}.ics\">Subscribe: {} (ICS)</a></li>\n",
                category.slug(),
                category.display_name()
            )
        })
        .collect();

    Html(format!(
        "<!doctype html>\n\
         <title>SoupCalendar</title>\n\
         <h1>Soup &amp; Pantry Calendar Subscriptions</h1>\n\
         <ul>\n{links}</ul>\n\
         <p>To subscribe in Google Calendar: <em>Settings &gt; Add calendar &gt; From URL</em> \
         and paste one of the .ics URLs above.</p>\n"
    ))
}

/// GET /calendars/{slug}.ics - One category feed
async fn calendar_feed(State(state): State<AppState>, Path(file): Path<String>) -> Response {
    let Some(category) = file
        .strip_suffix(".ics")
        .and_then(FeedCategory::from_slug)
    else {
        return (StatusCode::NOT_FOUND, "Unknown calendar").into_response();
    };

    let Some(feeds) = state.snapshot().await else {
        return (StatusCode::SERVICE_UNAVAILABLE, "Not ready yet").into_response();
    };

    match feeds.feed(category) {
        Some(ics) => ([(header::CONTENT_TYPE, ICS_CONTENT_TYPE)], ics.to_string()).into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "Not ready yet").into_response(),
    }
}

/// Feed status returned by /health
#[derive(Serialize)]
pub struct HealthResponse {
    pub ready: bool,
    pub generated_at: Option<DateTime<Utc>>,
    pub records: usize,
    pub events: usize,
}

/// GET /health - Whether feeds have been published yet
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let response = match state.snapshot().await {
        Some(feeds) => HealthResponse {
            ready: true,
            generated_at: Some(feeds.generated_at),
            records: feeds.records,
            events: feeds.events,
        },
        None => HealthResponse {
            ready: false,
            generated_at: None,
            records: 0,
            events: 0,
        },
    };

    Json(response)
}
