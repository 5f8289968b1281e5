pub mod answer;
pub mod loaders;
pub mod question;

pub use answer::AnswerSet;
pub use loaders::{load_question_bank, parse_question_bank};
pub use question::{Question, BLANK_MARKER};
