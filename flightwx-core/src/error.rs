use thiserror::Error;

/// Failure talking to the generative route provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("No API key configured for the route provider")]
    MissingApiKey,

    #[error("Route provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Route provider returned status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    #[error("Route provider returned an unusable response: {0}")]
    MalformedResponse(String),
}

/// Outcome of a route plan that did not produce a briefing.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("{0}")]
    Validation(String),

    #[error("No common flight path found between {origin} and {destination}")]
    NotFound { origin: String, destination: String },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl PlanError {
    /// HTTP status the front end reports for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            PlanError::Validation(_) => 400,
            PlanError::NotFound { .. } => 404,
            PlanError::Provider(_) => 500,
        }
    }
}
