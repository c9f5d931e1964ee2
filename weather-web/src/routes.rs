use axum::{
    Form,
    extract::State,
    response::Html,
};
use serde::Deserialize;
use weather_core::{WeatherQuery, WeatherView, lookup};

use crate::{AppState, render};

/// Form body posted by the page. A missing `city` is looked up as empty and
/// ends in the generic error like any other failure.
#[derive(Debug, Deserialize)]
pub struct WeatherForm {
    #[serde(default)]
    pub city: String,
}

/// GET / — empty page.
pub async fn index() -> Html<String> {
    Html(render::page(&WeatherView::empty()))
}

/// POST /weather — look up the city and render whichever side succeeded.
pub async fn weather(State(state): State<AppState>, Form(form): Form<WeatherForm>) -> Html<String> {
    let view = lookup(state.provider.as_ref(), &WeatherQuery::new(form.city)).await;
    Html(render::page(&view))
}
