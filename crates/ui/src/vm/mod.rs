mod home_vm;
mod quiz_vm;
mod stats_vm;
mod time_fmt;

pub use home_vm::HomeVm;
pub use quiz_vm::{
    OptionState, OptionVm, QuizIntent, QuizVm, PERSIST_WARNING, start_quiz,
};
pub use stats_vm::StatsVm;
pub use time_fmt::{format_clock, format_elapsed};
