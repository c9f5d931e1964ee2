//! HTTP front-end for the weather lookup.
//!
//! Two routes, both answering with the same HTML page:
//! - `GET /` renders the empty form
//! - `POST /weather` looks up the submitted city and renders the result or the error

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use weather_core::WeatherProvider;

pub mod render;
pub mod routes;

/// Shared, read-only state handed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/weather", post(routes::weather))
        .with_state(state)
}
