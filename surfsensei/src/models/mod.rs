//! Data models for surf sessions, recommendations and feedback.

mod conditions;
mod feedback;
mod recommendation;
mod session;

pub use conditions::ConditionsSuggestion;
pub use feedback::{Accuracy, FeedbackRecord};
pub use recommendation::{Recommendation, RecommendationOutcome};
pub use session::{SessionInput, SkillLevel, TideDirection};
