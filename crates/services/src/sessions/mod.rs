mod plan;
mod progress;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use plan::{QueueBuilder, SessionPlan};
pub use progress::SessionProgress;
pub use service::{AdvanceOutcome, AnswerFeedback, CurrentQuestion, QuizSession, SessionState};
pub use workflow::{AnswerSubmission, QuizLoopService};
