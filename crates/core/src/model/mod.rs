mod ids;
mod mode;
mod progress;
mod question;
mod session;

pub use ids::{ParseIndexError, QuestionIndex};
pub use mode::{ParseModeError, QuizMode, StartFrom};
pub use progress::ProgressMap;
pub use question::{AnswerOption, Question, QuestionError, QueueItem};
pub use session::{SessionReport, SessionStats, percent_correct};
