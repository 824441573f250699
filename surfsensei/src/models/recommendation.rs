//! Structured recommendation parsed from a model response.

use serde::{Deserialize, Serialize};

/// The four-part answer: where, what board, why not elsewhere, how to surf it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub spot: String,
    pub board: String,
    pub comparison: String,
    pub strategy: String,
}

impl Recommendation {
    /// Section titles paired with their content, in display order.
    pub fn sections(&self) -> [(&'static str, &str); 4] {
        [
            ("Spot Recommendation", &self.spot),
            ("Board Recommendation", &self.board),
            ("Spot Comparison", &self.comparison),
            ("Session Strategy", &self.strategy),
        ]
    }
}

/// Outcome of a recommendation request as shown to the user.
///
/// `recommendation` is `None` when the response could not be split into
/// sections; the raw text is always kept so it can be shown instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationOutcome {
    pub raw: String,
    pub recommendation: Option<Recommendation>,
    pub parse_notice: Option<String>,
}
