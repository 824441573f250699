//! Feedback records: the user's verdict on a past recommendation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a recommendation matched reality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accuracy {
    Accurate,
    Inaccurate,
}

impl Accuracy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accurate => "accurate",
            Self::Inaccurate => "inaccurate",
        }
    }
}

impl std::fmt::Display for Accuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One submitted judgment. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub timestamp: DateTime<Utc>,
    pub accuracy: Accuracy,
    #[serde(default)]
    pub comments: String,
}

impl FeedbackRecord {
    /// Create a record stamped with the current time.
    pub fn new(accuracy: Accuracy, comments: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            accuracy,
            comments: comments.into(),
        }
    }

    /// A correction is an inaccurate verdict that explains what was wrong.
    pub fn correction(&self) -> Option<&str> {
        let comment = self.comments.trim();
        (self.accuracy == Accuracy::Inaccurate && !comment.is_empty()).then_some(self.comments.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correction_requires_inaccurate_and_comment() {
        assert!(FeedbackRecord::new(Accuracy::Accurate, "great").correction().is_none());
        assert!(FeedbackRecord::new(Accuracy::Inaccurate, "  ").correction().is_none());
        assert_eq!(
            FeedbackRecord::new(Accuracy::Inaccurate, "wind was onshore").correction(),
            Some("wind was onshore")
        );
    }

    #[test]
    fn storage_format() {
        let json = r#"{"timestamp":"2024-05-01T12:00:00.000Z","accuracy":"inaccurate","comments":"closed out"}"#;
        let record: FeedbackRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.accuracy, Accuracy::Inaccurate);
        assert_eq!(record.comments, "closed out");
    }
}
