//! Core library for the `weather` tools.
//!
//! This crate defines:
//! - Configuration loading (file + environment)
//! - The OpenWeather provider and the request-scoped lookup built on it
//! - Shared domain models (query, result, renderable view)
//! - The calculator and file demo used by the CLI
//!
//! It is used by `weather-cli` and `weather-web`.

pub mod calculator;
pub mod config;
pub mod file_demo;
pub mod lookup;
pub mod model;
pub mod provider;

pub use config::Config;
pub use lookup::lookup;
pub use model::{
    Coordinates, ErrorResult, GENERIC_ERROR_MESSAGE, WeatherQuery, WeatherResult, WeatherView,
};
pub use provider::{ProviderError, WeatherProvider, provider_from_config};
