//! 终端界面
//!
//! [`Screen`] 是某一时刻应当展示的内容，由流程层根据状态构造，
//! 这里只负责把它变成文本。

use std::fmt;

use crate::quiz::{QuizSession, Report};
use crate::render::options::{options_to_text, render_options, OptionView};
use crate::render::sentence::{render_sentence, sentence_to_text, SentencePart};

/// 作答界面的数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub index: usize,
    pub total: usize,
    pub time_remaining: u32,
    pub sentence: Vec<SentencePart>,
    pub options: Vec<OptionView>,
    /// 所有空都已填写，可以点 Next/Submit
    pub can_advance: bool,
    pub is_last: bool,
}

impl QuestionView {
    /// 当前题目已载入时构造作答界面
    pub fn from_session(session: &QuizSession) -> Option<Self> {
        let question = session.question()?;
        let answers = session.answers();

        Some(Self {
            index: session.current_index(),
            total: session.question_count(),
            time_remaining: session.time_remaining(),
            sentence: render_sentence(&question.sentence, answers),
            options: render_options(&question.options, answers),
            can_advance: answers.is_complete(),
            is_last: session.is_last_question(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// 正在拉取第 n 题
    Loading { index: usize },
    /// 拉取第 n 题失败，等待用户 `retry`
    LoadFailed { index: usize, message: String },
    Answering(QuestionView),
    /// 已结束，等待完整题目列表
    ComputingResults,
    Results(Report),
}

impl fmt::Display for QuestionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fill in the Blanks  (Question {} / {})", self.index, self.total)?;
        writeln!(f, "Time left: {}s", self.time_remaining)?;
        writeln!(f)?;
        writeln!(f, "{}", sentence_to_text(&self.sentence))?;
        writeln!(f)?;
        writeln!(f, "{}", options_to_text(&self.options))?;
        writeln!(f)?;

        let action = if self.is_last { "submit" } else { "next" };
        if self.can_advance {
            write!(f, "[{}] pick <n|word> · clear <n>", action)
        } else {
            write!(
                f,
                "[{} disabled until all blanks are filled] pick <n|word> · clear <n>",
                action
            )
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Your Results")?;
        writeln!(f, "Score: {} / {}", self.score, self.total_questions)?;

        for (i, item) in self.per_question.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "Q{}: {}", i + 1, item.sentence)?;
            writeln!(f, "Your answer: {}", item.user_answer.join(", "))?;
            if item.is_correct {
                writeln!(f, "Correct ✅")?;
            } else {
                writeln!(f, "Incorrect ❌")?;
                writeln!(f, "Correct answer: {}", item.correct_answer.join(", "))?;
            }
        }

        writeln!(f)?;
        write!(f, "Play again? (restart / quit)")
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Loading { .. } => write!(f, "Loading..."),
            Screen::LoadFailed { index, message } => write!(
                f,
                "Could not load question {}: {}\nType 'retry' to try again or 'quit' to exit.",
                index, message
            ),
            Screen::Answering(view) => write!(f, "{}", view),
            Screen::ComputingResults => write!(f, "Loading results..."),
            Screen::Results(report) => write!(f, "{}", report),
        }
    }
}
