//! HTTP front end: `POST /api/weather`.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use flightwx_core::{PlanError, RoutePlanner, RoutePoint, RouteRequest};
use serde::Deserialize;
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    start_airport: Option<String>,
    destination_airport: Option<String>,
}

/// Plan errors rendered as `{"error": "..."}` with a matching status.
#[derive(Debug)]
pub struct ApiError(PlanError);

impl From<PlanError> for ApiError {
    fn from(err: PlanError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = match &self.0 {
            PlanError::Provider(e) => {
                tracing::error!(error = %e, "route provider failed");
                "Could not retrieve flight path. Check API key and try again.".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn router(planner: RoutePlanner) -> Router {
    Router::new()
        .route("/api/weather", post(route_weather))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(planner))
}

async fn route_weather(
    State(planner): State<Arc<RoutePlanner>>,
    query: Result<Json<WeatherQuery>, JsonRejection>,
) -> Result<Json<Vec<RoutePoint>>, ApiError> {
    let Json(query) = query.map_err(|rejection| {
        PlanError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let request = RouteRequest::new(
        query.start_airport.unwrap_or_default(),
        query.destination_airport.unwrap_or_default(),
    )?;

    let points = planner.plan_route(&request).await?;
    Ok(Json(points))
}

pub async fn serve(planner: RoutePlanner, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router(planner)).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
