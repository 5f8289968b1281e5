pub mod command;
pub mod quiz_flow;
pub mod ticker;

pub use command::{parse_command, Command};
pub use quiz_flow::{QuizEvent, QuizFlow, Update};
pub use ticker::TickerHandle;
