pub mod local_bank;
pub mod question_client;
pub mod source;

pub use local_bank::LocalQuestionBank;
pub use question_client::QuestionClient;
pub use source::QuestionSource;
