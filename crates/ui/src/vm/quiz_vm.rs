use quiz_core::model::{QuizMode, StartFrom};
use services::{EmptyQueueReason, QuizLoopService, QuizSession, SessionError, SessionState};

use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Answer(char),
    Next,
    Finish,
}

/// How an option renders before and after the question is answered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    Open,
    Locked,
    Correct,
    WrongChoice,
}

impl OptionState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            OptionState::Open => "option",
            OptionState::Locked => "option locked",
            OptionState::Correct => "option correct",
            OptionState::WrongChoice => "option wrong",
        }
    }

    #[must_use]
    pub fn is_disabled(self) -> bool {
        !matches!(self, OptionState::Open)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub letter: char,
    pub label: String,
    pub state: OptionState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub mode_label: &'static str,
    pub heading: String,
    pub text: String,
    pub options: Vec<OptionVm>,
    pub feedback: Option<String>,
    pub answered: bool,
    pub is_last: bool,
    pub progress_percent: u8,
}

impl QuizVm {
    /// Snapshot of the current question, or `None` past the end of the queue.
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Option<Self> {
        let current = session.current()?;
        let question = &current.item.question;
        let answer = current.answer;

        let options = question
            .options()
            .iter()
            .map(|option| {
                let letter = option.letter();
                let state = match answer {
                    None => OptionState::Open,
                    Some(feedback) if letter == feedback.correct_letter => OptionState::Correct,
                    Some(feedback) if letter == feedback.chosen => OptionState::WrongChoice,
                    Some(_) => OptionState::Locked,
                };
                OptionVm {
                    letter,
                    label: format!("{letter}) {}", option.text()),
                    state,
                }
            })
            .collect();

        let feedback = answer.map(|feedback| {
            if feedback.is_correct {
                "Correct!".to_string()
            } else {
                format!("Wrong. The right answer is {}.", feedback.correct_letter)
            }
        });

        Some(Self {
            mode_label: mode_label(session.mode()),
            heading: format!(
                "Question {} ({} / {})",
                current.item.index.number(),
                current.position + 1,
                current.total
            ),
            text: question.text().to_string(),
            options,
            feedback,
            answered: answer.is_some(),
            is_last: current.position + 1 == current.total,
            progress_percent: session.progress().percent_through(),
        })
    }

    #[must_use]
    pub fn next_label(&self) -> &'static str {
        if self.is_last { "Show results" } else { "Next" }
    }
}

fn mode_label(mode: QuizMode) -> &'static str {
    match mode {
        QuizMode::Sequential => "Sequential",
        QuizMode::Random => "Random",
        QuizMode::Errors => "Review errors",
    }
}

/// Shown when an answer was scored but the progress write failed.
pub const PERSIST_WARNING: &str = "Your answer counts, but progress could not be saved.";

impl From<SessionError> for ViewError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidStart { requested, total } => {
                ViewError::InvalidStart { requested, total }
            }
            SessionError::EmptyQueue(EmptyQueueReason::NoWrongAnswers) => ViewError::NoWrongAnswers,
            SessionError::EmptyQueue(EmptyQueueReason::NoQuestionsRemain) => ViewError::NoQuestions,
            _ => ViewError::Unknown,
        }
    }
}

/// # Errors
///
/// Returns `ViewError::InvalidStart`, `ViewError::NoWrongAnswers` or
/// `ViewError::NoQuestions` when no queue could be built.
pub async fn start_quiz(
    quiz_loop: &QuizLoopService,
    mode: QuizMode,
    start: StartFrom,
) -> Result<SessionState, ViewError> {
    let mut state = SessionState::default();
    quiz_loop.start_session(&mut state, mode, start).await?;
    Ok(state)
}
