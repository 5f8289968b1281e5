//! 展示层：无状态，只把控制器状态变成视图和文本

pub mod options;
pub mod screen;
pub mod sentence;

pub use options::{render_options, resolve_pick, OptionView};
pub use screen::{QuestionView, Screen};
pub use sentence::{render_sentence, SentencePart, EMPTY_BLANK};
