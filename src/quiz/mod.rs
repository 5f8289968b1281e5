pub mod scoring;
pub mod session;
pub mod timer;

pub use scoring::{build_report, QuestionFeedback, Report};
pub use session::{
    AdvanceOutcome, AdvanceTrigger, Phase, QuizRunState, QuizSession, TickEvent, DEFAULT_BLANKS,
};
pub use timer::{Countdown, TickOutcome, TimerState, TimerToken};
