use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    InvalidStart { requested: usize, total: usize },
    NoWrongAnswers,
    NoQuestions,
    ResetFailed,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> String {
        match self {
            ViewError::InvalidStart { requested, total } => {
                format!("Question #{requested} does not exist (total questions: {total}).")
            }
            ViewError::NoWrongAnswers => "No wrong answers to review.".to_string(),
            ViewError::NoQuestions => "There are no questions to show.".to_string(),
            ViewError::ResetFailed => "Progress could not be reset. Please try again.".to_string(),
            ViewError::Unknown => "Something went wrong. Please try again.".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
