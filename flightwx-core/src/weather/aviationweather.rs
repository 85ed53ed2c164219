use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    Config,
    http::client_with_timeout,
    model::{ReportKind, WeatherReport},
};

use super::WeatherSource;

/// Client for the aviationweather.gov data API (XML format).
#[derive(Debug, Clone)]
pub struct AviationWeatherClient {
    base_url: String,
    http: Client,
}

impl AviationWeatherClient {
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        Ok(Self {
            base_url: config.weather.base_url.trim_end_matches('/').to_string(),
            http: client_with_timeout(config.http.timeout())?,
        })
    }

    async fn fetch_body(&self, code: &str, kind: ReportKind) -> reqwest::Result<String> {
        let url = format!("{}/api/data/{}", self.base_url, kind.endpoint());

        self.http
            .get(url)
            .query(&[("ids", code), ("format", "xml")])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[async_trait]
impl WeatherSource for AviationWeatherClient {
    async fn fetch_report(&self, code: &str, kind: ReportKind) -> WeatherReport {
        let body = match self.fetch_body(code, kind).await {
            Ok(body) => body,
            Err(e) => {
                warn!(%code, %kind, error = %e, "weather fetch failed");
                return WeatherReport::FetchFailed;
            }
        };

        match parse_report(&body, kind) {
            Ok(report) => {
                debug!(%code, %kind, degraded = report.is_degraded(), "weather fetched");
                report
            }
            Err(e) => {
                warn!(%code, %kind, error = %e, "weather parse failed");
                WeatherReport::ParseFailed
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct AwResponse {
    data: Option<AwData>,
}

#[derive(Debug, Deserialize, Default)]
struct AwData {
    #[serde(rename = "METAR", default)]
    metars: Vec<AwReport>,
    #[serde(rename = "TAF", default)]
    tafs: Vec<AwReport>,
}

#[derive(Debug, Deserialize)]
struct AwReport {
    raw_text: Option<String>,
}

/// Extract the first `data/<KIND>/raw_text` of a data API response.
fn parse_report(xml: &str, kind: ReportKind) -> Result<WeatherReport, quick_xml::DeError> {
    let response: AwResponse = quick_xml::de::from_str(xml)?;
    let data = response.data.unwrap_or_default();

    let first = match kind {
        ReportKind::Metar => data.metars.into_iter().next(),
        ReportKind::Taf => data.tafs.into_iter().next(),
    };

    Ok(first.map_or(WeatherReport::Absent, |report| classify_raw_text(report.raw_text)))
}

fn classify_raw_text(raw_text: Option<String>) -> WeatherReport {
    match raw_text {
        None => WeatherReport::Absent,
        Some(text) if text.is_empty() => WeatherReport::Blank,
        Some(text) => WeatherReport::Available(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, extract::Query, http::StatusCode, routing::get};
    use std::collections::HashMap;
    use std::time::Duration;

    const METAR_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<response xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" version="1.3">
  <request_index>1185468</request_index>
  <data_source name="metars"/>
  <request type="retrieve"/>
  <errors/>
  <warnings/>
  <time_taken_ms>12</time_taken_ms>
  <data num_results="1">
    <METAR>
      <raw_text>VIDP 181030Z 27005KT 3000 HZ FEW035 31/18 Q1012 NOSIG</raw_text>
      <station_id>VIDP</station_id>
      <observation_time>2026-10-18T10:30:00Z</observation_time>
      <sky_condition sky_cover="FEW" cloud_base_ft_agl="3500"/>
      <flight_category>MVFR</flight_category>
    </METAR>
  </data>
</response>"#;

    const TAF_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<response version="1.3">
  <data num_results="1">
    <TAF>
      <raw_text>TAF VIDP 181100Z 1812/1918 27008KT 3000 HZ TEMPO 1900/1903 1500 BR</raw_text>
      <station_id>VIDP</station_id>
      <forecast><fcst_time_from>2026-10-18T12:00:00Z</fcst_time_from></forecast>
      <forecast><fcst_time_from>2026-10-19T00:00:00Z</fcst_time_from></forecast>
    </TAF>
  </data>
</response>"#;

    const EMPTY_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<response version="1.3">
  <errors/>
  <data num_results="0"></data>
</response>"#;

    #[test]
    fn extracts_raw_metar_text() {
        let report = parse_report(METAR_XML, ReportKind::Metar).expect("parses");
        assert_eq!(
            report,
            WeatherReport::Available("VIDP 181030Z 27005KT 3000 HZ FEW035 31/18 Q1012 NOSIG".into())
        );
    }

    #[test]
    fn extracts_raw_taf_text() {
        let report = parse_report(TAF_XML, ReportKind::Taf).expect("parses");
        assert!(matches!(report, WeatherReport::Available(t) if t.starts_with("TAF VIDP")));
    }

    #[test]
    fn missing_report_is_absent() {
        let report = parse_report(EMPTY_XML, ReportKind::Metar).expect("parses");
        assert_eq!(report, WeatherReport::Absent);

        // a METAR document holds no TAF element
        let report = parse_report(METAR_XML, ReportKind::Taf).expect("parses");
        assert_eq!(report, WeatherReport::Absent);
    }

    #[test]
    fn truncated_document_is_a_parse_error() {
        assert!(parse_report("<response><data><METAR><raw_text>VIDP", ReportKind::Metar).is_err());
    }

    #[test]
    fn raw_text_classification() {
        assert_eq!(classify_raw_text(None), WeatherReport::Absent);
        assert_eq!(classify_raw_text(Some(String::new())), WeatherReport::Blank);
        // only an empty element is blank; whitespace is still text and kept verbatim
        assert_eq!(classify_raw_text(Some("  ".into())), WeatherReport::Available("  ".into()));
        assert_eq!(
            classify_raw_text(Some(" VABB 181030Z \n".into())),
            WeatherReport::Available(" VABB 181030Z \n".into())
        );
    }

    async fn spawn_weather(app: Router) -> AviationWeatherClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        let mut cfg = Config::default();
        cfg.weather.base_url = format!("http://{addr}/");
        cfg.http.timeout_secs = 1;
        AviationWeatherClient::from_config(&cfg).expect("client")
    }

    #[tokio::test]
    async fn fetches_both_products_for_station() {
        let app = Router::new()
            .route(
                "/api/data/metar",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    assert_eq!(q.get("ids").map(String::as_str), Some("VIDP"));
                    assert_eq!(q.get("format").map(String::as_str), Some("xml"));
                    METAR_XML
                }),
            )
            .route("/api/data/taf", get(|| async { TAF_XML }));
        let client = spawn_weather(app).await;

        let metar = client.fetch_observation("VIDP").await;
        let taf = client.fetch_forecast("VIDP").await;

        assert!(matches!(metar, WeatherReport::Available(t) if t.starts_with("VIDP 181030Z")));
        assert!(matches!(taf, WeatherReport::Available(t) if t.starts_with("TAF VIDP")));
    }

    #[tokio::test]
    async fn error_status_is_fetch_failure() {
        let app = Router::new()
            .route("/api/data/metar", get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }));
        let client = spawn_weather(app).await;

        assert_eq!(client.fetch_observation("VIDP").await, WeatherReport::FetchFailed);
        // unrouted path answers 404
        assert_eq!(client.fetch_forecast("VIDP").await, WeatherReport::FetchFailed);
    }

    #[tokio::test]
    async fn garbage_body_is_parse_failure() {
        let app = Router::new()
            .route("/api/data/metar", get(|| async { "<response><data><METAR><raw_text>VI" }));
        let client = spawn_weather(app).await;

        assert_eq!(client.fetch_observation("VIDP").await, WeatherReport::ParseFailed);
    }

    #[tokio::test]
    async fn empty_result_is_absent() {
        let app = Router::new().route("/api/data/taf", get(|| async { EMPTY_XML }));
        let client = spawn_weather(app).await;

        assert_eq!(client.fetch_forecast("Unknown").await, WeatherReport::Absent);
    }

    #[tokio::test]
    async fn slow_station_times_out_as_fetch_failure() {
        let app = Router::new().route(
            "/api/data/metar",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                METAR_XML
            }),
        );
        let client = spawn_weather(app).await;

        assert_eq!(client.fetch_observation("VIDP").await, WeatherReport::FetchFailed);
    }
}
