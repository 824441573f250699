//! Error taxonomy for recommendation, autofill and feedback flows.

use thiserror::Error;

/// Which kind of model request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Recommendation,
    Autofill,
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Recommendation => write!(f, "recommendation"),
            Self::Autofill => write!(f, "autofill"),
        }
    }
}

/// Errors raised by the surf advisor core.
///
/// Every variant is scoped to a single user action; none is fatal to the
/// process.
#[derive(Debug, Error)]
pub enum SurfError {
    /// The model answered but produced no usable text (e.g. safety filtering).
    #[error("The AI returned an empty response. This might be due to content safety filters.")]
    EmptyResponse,

    /// Network or service failure talking to the model.
    #[error("{0}")]
    Transport(String),

    /// The autofill response held no parseable JSON object.
    #[error("Invalid JSON format: {0}")]
    InvalidAutofillFormat(String),

    /// Wrapper for any failure on the autofill path.
    #[error("Could not auto-fill conditions. Please enter them manually.")]
    AutofillFailed(#[source] Box<SurfError>),

    /// The model response did not contain all four sections.
    #[error("Could not parse the recommendation. Displaying raw text.")]
    ParseFailure,

    /// Feedback history could not be read or written.
    #[error("Feedback persistence degraded: {0}")]
    PersistenceDegraded(String),

    #[error("Please enter a spot name first.")]
    MissingSpots,

    #[error("A comment is required when marking a forecast inaccurate.")]
    MissingComment,

    /// A request of the same kind is already outstanding.
    #[error("A {0} request is already in progress.")]
    Busy(RequestKind),

    #[error("No API key configured. Set GEMINI_API_KEY or pass --api-key.")]
    MissingApiKey,
}

impl SurfError {
    /// Message shown to the user for a failed recommendation request.
    pub fn recommendation_message(&self) -> String {
        match self {
            Self::EmptyResponse | Self::Busy(_) | Self::MissingApiKey => self.to_string(),
            other => match classify_message(&other.to_string()) {
                ErrorHint::Config => {
                    "Failed to get recommendation. Please check your API key configuration."
                        .to_string()
                }
                ErrorHint::Connectivity => {
                    "A network error occurred. Please check your connection and try again."
                        .to_string()
                }
                ErrorHint::Other => "Failed to get recommendation. Please try again.".to_string(),
            },
        }
    }
}

/// Display hint derived from a service error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorHint {
    /// Looks like an API key / configuration problem.
    Config,
    /// Looks like a connectivity problem.
    Connectivity,
    Other,
}

/// Classify a service error message by case-insensitive substring match.
///
/// The model service exposes no structured error codes we can rely on, so
/// this is the only place that inspects message text. Swap it out if that
/// changes.
pub fn classify_message(message: &str) -> ErrorHint {
    let lower = message.to_lowercase();
    if lower.contains("api key") {
        ErrorHint::Config
    } else if lower.contains("network") || lower.contains("fetch") {
        ErrorHint::Connectivity
    } else {
        ErrorHint::Other
    }
}
