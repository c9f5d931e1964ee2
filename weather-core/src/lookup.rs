//! The request-scoped weather lookup shared by the web handler and the CLI.

use crate::{
    model::{ErrorResult, WeatherQuery, WeatherView},
    provider::WeatherProvider,
};

/// Query `provider` for `query` and turn the outcome into a renderable view.
///
/// Every failure collapses into [`ErrorResult::generic`]; the specific cause is
/// only visible in the logs.
pub async fn lookup(provider: &dyn WeatherProvider, query: &WeatherQuery) -> WeatherView {
    tracing::debug!(city = %query.city, "looking up current weather");

    match provider.current_weather(query).await {
        Ok(result) => WeatherView::success(result),
        Err(err) => {
            tracing::warn!(city = %query.city, kind = err.kind(), "weather lookup failed: {err}");
            WeatherView::failure(ErrorResult::generic())
        }
    }
}
