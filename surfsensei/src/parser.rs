//! Splits a model response into the four recommendation sections.
//!
//! The response is scanned for an ordered list of bold markers. Each
//! section runs from the end of its marker to the start of the next marker,
//! or to the end of the text for the last one. A missing marker fails the
//! whole parse; there is no partial result.

use crate::error::SurfError;
use crate::models::{Recommendation, RecommendationOutcome};

/// Section markers in the order the model is told to emit them.
pub const SECTION_MARKERS: [&str; 4] = [
    "**Spot Recommendation:**",
    "**Board Recommendation:**",
    "**Spot Comparison:**",
    "**Session Strategy:**",
];

/// Parse a response into a [`Recommendation`].
///
/// Returns [`SurfError::ParseFailure`] unless all four markers are found in order.
pub fn parse_recommendation(text: &str) -> Result<Recommendation, SurfError> {
    let mut sections: Vec<String> = Vec::with_capacity(SECTION_MARKERS.len());
    let mut cursor = locate(text, 0, SECTION_MARKERS[0]).ok_or(SurfError::ParseFailure)?;

    for i in 0..SECTION_MARKERS.len() {
        let start = cursor;
        let end = match SECTION_MARKERS.get(i + 1) {
            Some(next) => {
                let found = text[start..]
                    .find(next)
                    .map(|offset| start + offset)
                    .ok_or(SurfError::ParseFailure)?;
                cursor = found + next.len();
                found
            }
            None => text.len(),
        };
        sections.push(text[start..end].trim().to_string());
    }

    let [spot, board, comparison, strategy]: [String; 4] =
        sections.try_into().map_err(|_| SurfError::ParseFailure)?;
    Ok(Recommendation {
        spot,
        board,
        comparison,
        strategy,
    })
}

/// Position just past `marker`, searching from `from`.
fn locate(text: &str, from: usize, marker: &str) -> Option<usize> {
    text[from..].find(marker).map(|offset| from + offset + marker.len())
}

/// Parse a raw response into what the user sees: sections, or raw text with a notice.
pub fn into_outcome(raw: String) -> RecommendationOutcome {
    match parse_recommendation(&raw) {
        Ok(recommendation) => RecommendationOutcome {
            raw,
            recommendation: Some(recommendation),
            parse_notice: None,
        },
        Err(err) => {
            tracing::warn!(response_len = raw.len(), "Recommendation sections not found");
            RecommendationOutcome {
                raw,
                recommendation: None,
                parse_notice: Some(err.to_string()),
            }
        }
    }
}

/// Split a section into paragraphs: one per non-blank line.
pub fn paragraphs(text: &str) -> Vec<&str> {
    text.lines().filter(|line| !line.trim().is_empty()).collect()
}
