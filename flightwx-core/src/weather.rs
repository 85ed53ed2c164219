use async_trait::async_trait;
use std::fmt::Debug;

use crate::model::{ReportKind, WeatherReport};

pub mod aviationweather;

pub use aviationweather::AviationWeatherClient;

/// Source of raw METAR/TAF text for a location code.
///
/// Fetching never fails outright: every failure is folded into a
/// degraded [`WeatherReport`] so one station cannot sink a whole route.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_report(&self, code: &str, kind: ReportKind) -> WeatherReport;

    async fn fetch_observation(&self, code: &str) -> WeatherReport {
        self.fetch_report(code, ReportKind::Metar).await
    }

    async fn fetch_forecast(&self, code: &str) -> WeatherReport {
        self.fetch_report(code, ReportKind::Taf).await
    }
}
