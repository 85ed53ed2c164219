use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

use crate::{Config, error::ProviderError, provider::gemini::GeminiRouteSuggester};

pub mod gemini;

/// Source of candidate flight paths between two airports.
#[async_trait]
pub trait RouteSuggester: Send + Sync + Debug {
    /// Cities overflown between `origin` and `destination`, in flight order.
    ///
    /// An empty list means the provider found no plausible path.
    async fn suggest(&self, origin: &str, destination: &str) -> Result<Vec<String>, ProviderError>;
}

/// Construct the configured route suggester.
pub fn route_suggester_from_config(
    config: &Config,
) -> Result<Arc<dyn RouteSuggester>, ProviderError> {
    Ok(Arc::new(GeminiRouteSuggester::from_config(config)?))
}

/// Few-shot prompt asking for a comma separated list of cities.
pub fn build_prompt(origin: &str, destination: &str) -> String {
    format!(
        "You are an expert travel assistant. A user is planning a trip in India \
         from {origin} to {destination}. Suggest a possible flight path, listing at least \
         5-10 major cities the flight is likely to pass through. Consider that there may not \
         be direct flights, and provide a reasonable, common route. Do not number the cities.\n\
         Do not include the starting or destination airport codes in the list.\n\
         Provide the city names only, separated by commas.\n\
         If there are no likely cities, or you cannot determine a path, respond with \"None\".\n\
         \n\
         Examples:\n\
         User: DEL to BOM\n\
         Assistant: Delhi,Jaipur,Ahmedabad,Mumbai\n\
         User: CCU to GOI\n\
         Assistant: Kolkata,Bhubaneswar,Hyderabad,Bangalore,Goa\n\
         User: CJB to TRV\n\
         Assistant: Coimbatore,Kochi,Thiruvananthapuram\n\
         User: abcd to xyz\n\
         Assistant: None\n"
    )
}

/// Turn the model's answer into an ordered city list.
///
/// Any occurrence of `None` means "no route". Empty tokens are dropped.
pub fn parse_route_response(text: &str) -> Vec<String> {
    if text.contains("None") {
        return Vec::new();
    }

    text.split(',')
        .map(str::trim)
        .filter(|city| !city.is_empty())
        .map(str::to_string)
        .collect()
}
