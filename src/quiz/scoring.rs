//! 计分与反馈
//!
//! 纯函数：相同输入总是得到相同的报告。

use serde::Serialize;

use crate::error::{QuizError, Result};
use crate::models::{AnswerSet, Question};

/// 单题反馈
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionFeedback {
    pub sentence: String,
    pub user_answer: Vec<String>,
    pub correct_answer: Vec<String>,
    pub is_correct: bool,
}

/// 成绩报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub total_questions: usize,
    pub score: usize,
    pub per_question: Vec<QuestionFeedback>,
}

/// 根据作答历史和完整题目列表生成报告
///
/// 第 i 条历史与第 i 道题比较，必须逐词完全一致才算对，没有部分得分。
/// 历史或题目少于 `total_questions` 时返回 [`QuizError::DataIncomplete`]。
pub fn build_report(
    history: &[AnswerSet],
    questions: &[Question],
    total_questions: usize,
) -> Result<Report> {
    if questions.len() < total_questions {
        return Err(QuizError::DataIncomplete {
            expected: total_questions,
            actual: questions.len(),
        });
    }
    if history.len() < total_questions {
        return Err(QuizError::DataIncomplete {
            expected: total_questions,
            actual: history.len(),
        });
    }

    let per_question: Vec<QuestionFeedback> = history
        .iter()
        .zip(questions)
        .take(total_questions)
        .map(|(answers, question)| QuestionFeedback {
            sentence: question.sentence.clone(),
            user_answer: answers.to_words(),
            correct_answer: question.correct_answers.clone(),
            is_correct: answers.matches(&question.correct_answers),
        })
        .collect();

    let score = per_question.iter().filter(|f| f.is_correct).count();

    Ok(Report {
        total_questions,
        score,
        per_question,
    })
}
