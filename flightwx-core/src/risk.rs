//! Keyword based hazard scoring for METAR/TAF pairs.

use crate::model::{ReportKind, WeatherReport};

/// Thunderstorm, fog, broken/overcast cloud and low-IFR markers.
pub const HAZARD_KEYWORDS: [&str; 5] = ["TS", "FG", "BKN", "OVC", "LIFR"];

/// Score reported when a report was present but carried no text.
pub const INVALID_SCORE: i8 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RiskAssessment {
    pub score: i8,
    pub details: Vec<String>,
}

/// Score a METAR/TAF pair.
///
/// Each report with a hazard keyword adds one point. A `Blank` report in
/// either field pins the score to -1, replacing whatever the other field
/// contributed. Absent and failed reports contribute nothing.
pub fn assess(metar: &WeatherReport, taf: &WeatherReport) -> RiskAssessment {
    let mut assessment = RiskAssessment::default();
    let mut invalid = false;

    for (kind, report) in [(ReportKind::Metar, metar), (ReportKind::Taf, taf)] {
        match report {
            WeatherReport::Available(text) if contains_hazard(text) => {
                assessment.score += 1;
                assessment.details.push(format!("Hazard in {kind}"));
            }
            WeatherReport::Blank => {
                invalid = true;
                assessment.details.push(format!("{kind} is not a string"));
            }
            _ => {}
        }
    }

    // TODO: confirm with product whether a blank report should erase the other field's score.
    if invalid {
        assessment.score = INVALID_SCORE;
    }

    assessment
}

/// Case-sensitive substring search for any hazard keyword.
pub fn contains_hazard(text: &str) -> bool {
    HAZARD_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}
