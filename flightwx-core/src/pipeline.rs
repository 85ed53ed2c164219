//! Route briefing pipeline: suggest a path, resolve codes, fetch and score weather.

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{
    Config,
    codes::{self, ResolvedCity},
    error::PlanError,
    model::{RoutePoint, RouteRequest, WeatherAssessment},
    provider::{RouteSuggester, route_suggester_from_config},
    risk,
    weather::{AviationWeatherClient, WeatherSource},
};

#[derive(Debug, Clone)]
pub struct RoutePlanner {
    suggester: Arc<dyn RouteSuggester>,
    weather: Arc<dyn WeatherSource>,
    max_concurrent_fetches: usize,
}

impl RoutePlanner {
    pub fn new(
        suggester: Arc<dyn RouteSuggester>,
        weather: Arc<dyn WeatherSource>,
        max_concurrent_fetches: usize,
    ) -> Self {
        Self { suggester, weather, max_concurrent_fetches: max_concurrent_fetches.max(1) }
    }

    /// Planner wired to the configured route provider and aviationweather.gov.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let suggester = route_suggester_from_config(config)?;
        let weather: Arc<dyn WeatherSource> = Arc::new(AviationWeatherClient::from_config(config)?);

        Ok(Self::new(suggester, weather, config.http.max_concurrent_fetches))
    }

    /// Suggest a route and brief the weather for every city on it, in flight order.
    ///
    /// An empty suggestion is [`PlanError::NotFound`]; a successful plan is never empty.
    #[instrument(skip_all, fields(origin = %request.origin, destination = %request.destination))]
    pub async fn plan_route(&self, request: &RouteRequest) -> Result<Vec<RoutePoint>, PlanError> {
        let cities = self.suggester.suggest(&request.origin, &request.destination).await?;

        if cities.is_empty() {
            return Err(PlanError::NotFound {
                origin: request.origin.clone(),
                destination: request.destination.clone(),
            });
        }

        let resolved = codes::resolve(&cities);
        info!(cities = resolved.len(), "route suggested, fetching weather");

        // `buffered` yields in input order regardless of completion order.
        let points = stream::iter(resolved)
            .map(|city| self.brief(city))
            .buffered(self.max_concurrent_fetches)
            .collect::<Vec<_>>()
            .await;

        Ok(points)
    }

    async fn brief(&self, resolved: ResolvedCity) -> RoutePoint {
        let (metar, taf) = tokio::join!(
            self.weather.fetch_observation(&resolved.code),
            self.weather.fetch_forecast(&resolved.code),
        );
        let risk = risk::assess(&metar, &taf);

        RoutePoint {
            city: resolved.city,
            icao_code: resolved.code,
            weather: WeatherAssessment {
                metar,
                taf,
                risk_score: risk.score,
                risk_details: risk.details,
            },
        }
    }
}
