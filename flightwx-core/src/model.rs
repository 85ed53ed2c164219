use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::PlanError;

/// Origin/destination pair a route is planned for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
}

impl RouteRequest {
    /// Build a request from raw user input. Blank codes are rejected.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Result<Self, PlanError> {
        let origin = origin.into().trim().to_string();
        let destination = destination.into().trim().to_string();

        if origin.is_empty() || destination.is_empty() {
            return Err(PlanError::Validation(
                "Missing start_airport or destination_airport parameter".to_string(),
            ));
        }

        Ok(Self { origin, destination })
    }
}

/// Which aviation weather product a report carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Metar,
    Taf,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Metar => "METAR",
            ReportKind::Taf => "TAF",
        }
    }

    /// Path segment of the aviation weather data API.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ReportKind::Metar => "metar",
            ReportKind::Taf => "taf",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of fetching one METAR or TAF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherReport {
    /// Raw report text.
    Available(String),
    /// The report element exists but carries no text.
    Blank,
    /// The provider answered but had no report for the station.
    Absent,
    /// Transport error, timeout or non-success status.
    FetchFailed,
    /// The response body was not the expected XML document.
    ParseFailed,
}

impl WeatherReport {
    /// Text shown to users. `Blank` has no text and renders as `None`.
    pub fn render(&self, kind: ReportKind) -> Option<String> {
        match self {
            WeatherReport::Available(text) => Some(text.clone()),
            WeatherReport::Blank => None,
            WeatherReport::Absent => Some(format!("No {kind} data")),
            WeatherReport::FetchFailed => Some(format!("{kind} fetch failed")),
            WeatherReport::ParseFailed => Some(format!("{kind} parse failed")),
        }
    }

    pub fn is_degraded(&self) -> bool {
        !matches!(self, WeatherReport::Available(_))
    }
}

/// Weather and hazard score for one point of the route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherAssessment {
    #[serde(serialize_with = "serialize_metar")]
    pub metar: WeatherReport,
    #[serde(serialize_with = "serialize_taf")]
    pub taf: WeatherReport,
    pub risk_score: i8,
    pub risk_details: Vec<String>,
}

fn serialize_metar<S: Serializer>(report: &WeatherReport, s: S) -> Result<S::Ok, S::Error> {
    report.render(ReportKind::Metar).serialize(s)
}

fn serialize_taf<S: Serializer>(report: &WeatherReport, s: S) -> Result<S::Ok, S::Error> {
    report.render(ReportKind::Taf).serialize(s)
}

/// One city on the suggested flight path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePoint {
    pub city: String,
    pub icao_code: String,
    pub weather: WeatherAssessment,
}
