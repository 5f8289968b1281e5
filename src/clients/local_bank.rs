//! 本地题库
//!
//! 题目全部预先加载在内存中，离线模式和测试都用它。

use std::path::Path;
use std::sync::Arc;

use crate::clients::source::QuestionSource;
use crate::error::{QuizError, Result};
use crate::models::{load_question_bank, Question};

/// 内存题库
#[derive(Debug, Clone)]
pub struct LocalQuestionBank {
    questions: Arc<Vec<Question>>,
}

impl LocalQuestionBank {
    pub fn from_questions(questions: Vec<Question>) -> Self {
        Self {
            questions: Arc::new(questions),
        }
    }

    /// 从 TOML 文件加载
    pub async fn load(path: &Path) -> Result<Self> {
        let questions = load_question_bank(path).await?;
        Ok(Self::from_questions(questions))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl QuestionSource for LocalQuestionBank {
    async fn fetch_question(&self, index: usize) -> Result<Question> {
        index
            .checked_sub(1)
            .and_then(|i| self.questions.get(i))
            .cloned()
            .ok_or(QuizError::NotFound { index })
    }

    async fn fetch_all(&self) -> Result<Vec<Question>> {
        Ok(self.questions.as_ref().clone())
    }
}
