//! Application shell: composes prompt assembly, the model client, parsing
//! and the feedback store behind the three user actions.
//!
//! At most one recommendation and one autofill request may be in flight at
//! a time. The two kinds are independent of each other.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::autofill::{conditions_prompt, parse_conditions};
use crate::error::{RequestKind, SurfError};
use crate::gemini::ModelClient;
use crate::models::{
    Accuracy, ConditionsSuggestion, FeedbackRecord, RecommendationOutcome, SessionInput,
};
use crate::parser::into_outcome;
use crate::prompt;
use crate::store::FeedbackStore;

/// Clears an in-flight flag when dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn begin(flag: &'a AtomicBool, kind: RequestKind) -> Result<Self, SurfError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SurfError::Busy(kind))?;
        Ok(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Which requests are currently outstanding.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellStatus {
    pub recommending: bool,
    pub autofilling: bool,
}

pub struct Shell {
    model: Arc<dyn ModelClient>,
    store: Arc<dyn FeedbackStore>,
    recommending: AtomicBool,
    autofilling: AtomicBool,
}

impl Shell {
    pub fn new(model: Arc<dyn ModelClient>, store: Arc<dyn FeedbackStore>) -> Self {
        Self {
            model,
            store,
            recommending: AtomicBool::new(false),
            autofilling: AtomicBool::new(false),
        }
    }

    pub fn status(&self) -> ShellStatus {
        ShellStatus {
            recommending: self.recommending.load(Ordering::Acquire),
            autofilling: self.autofilling.load(Ordering::Acquire),
        }
    }

    /// Ask the model for a recommendation.
    ///
    /// Transport and empty-response failures are returned. A response that
    /// cannot be split into sections is not an error: the outcome carries the
    /// raw text and a notice instead.
    pub async fn recommend(&self, input: &SessionInput) -> Result<RecommendationOutcome, SurfError> {
        let _in_flight = InFlight::begin(&self.recommending, RequestKind::Recommendation)?;

        let feedback = self.store.all();
        let prompt = prompt::assemble(input, &feedback);
        info!(
            spots = %input.spots,
            corrections = feedback.iter().filter(|r| r.correction().is_some()).count(),
            "Requesting recommendation"
        );

        let raw = self
            .model
            .generate(&prompt.system_instruction, &prompt.user_query)
            .await
            .inspect_err(|e| error!("Recommendation request failed: {e}"))?;

        Ok(into_outcome(raw))
    }

    /// Fetch live conditions for `location_query`.
    ///
    /// Every failure is wrapped in [`SurfError::AutofillFailed`].
    pub async fn fetch_conditions(
        &self,
        location_query: &str,
    ) -> Result<ConditionsSuggestion, SurfError> {
        let _in_flight = InFlight::begin(&self.autofilling, RequestKind::Autofill)?;

        info!(query = %location_query, "Requesting live conditions");
        self.model
            .generate_with_search(&conditions_prompt(location_query))
            .await
            .and_then(|text| parse_conditions(&text))
            .map_err(|e| {
                error!("Autofill error: {e}");
                SurfError::AutofillFailed(Box::new(e))
            })
    }

    /// Autofill the environmental fields of `input` from its spots.
    ///
    /// All or nothing: on failure `input` is not modified and the error is returned.
    pub async fn autofill(&self, input: &mut SessionInput) -> Result<(), SurfError> {
        if input.spots.trim().is_empty() {
            return Err(SurfError::MissingSpots);
        }
        let suggestion = self.fetch_conditions(&input.spots).await?;
        suggestion.merge_into(input);
        Ok(())
    }

    /// Record the user's verdict on the last recommendation.
    ///
    /// A comment is required when the verdict is inaccurate. Storage failures
    /// are logged and otherwise ignored; the submission still succeeds.
    pub fn submit_feedback(
        &self,
        accuracy: Accuracy,
        comments: &str,
    ) -> Result<FeedbackRecord, SurfError> {
        if accuracy == Accuracy::Inaccurate && comments.trim().is_empty() {
            return Err(SurfError::MissingComment);
        }

        let record = FeedbackRecord::new(accuracy, comments);
        info!(accuracy = %record.accuracy, "Feedback received");
        if let Err(e) = self.store.append(record.clone()) {
            warn!("Failed to save feedback: {e}");
        }
        Ok(record)
    }

    /// Full feedback history.
    pub fn history(&self) -> Vec<FeedbackRecord> {
        self.store.all()
    }
}
