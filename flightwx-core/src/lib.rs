//! Core library for the `flightwx` tool.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Route suggestion through a generative text provider
//! - City to ICAO code lookup
//! - METAR/TAF retrieval and keyword risk scoring
//! - The pipeline tying these together into a route briefing
//!
//! It is used by `flightwx-cli`, but can also be reused by other binaries or services.

pub mod codes;
pub mod config;
pub mod error;
mod http;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod risk;
pub mod weather;

pub use config::Config;
pub use error::{PlanError, ProviderError};
pub use model::{ReportKind, RoutePoint, RouteRequest, WeatherAssessment, WeatherReport};
pub use pipeline::RoutePlanner;
pub use provider::RouteSuggester;
pub use weather::WeatherSource;
