//! Prompt assembly: system instruction plus user query.
//!
//! Pure string construction. Feedback history is passed in by the caller;
//! nothing here touches storage or the network.

mod corrections;
mod query;
mod system;

pub use corrections::build_corrections;
pub use query::user_query;
pub use system::SYSTEM_TEMPLATE;

use crate::models::{FeedbackRecord, SessionInput};

/// The two strings sent to the model for a recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPrompt {
    pub system_instruction: String,
    pub user_query: String,
}

/// System instruction with the correction block appended when there is one.
pub fn system_instruction(feedback: &[FeedbackRecord]) -> String {
    match build_corrections(feedback) {
        Some(block) => format!("{SYSTEM_TEMPLATE}\n\n{block}"),
        None => SYSTEM_TEMPLATE.to_string(),
    }
}

/// Assemble both prompt parts for a session.
pub fn assemble(input: &SessionInput, feedback: &[FeedbackRecord]) -> AssembledPrompt {
    AssembledPrompt {
        system_instruction: system_instruction(feedback),
        user_query: user_query(input),
    }
}
