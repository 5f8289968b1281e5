use crate::error::{QuizError, Result};
use crate::models::question::Question;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// TOML 题库文件结构
///
/// ```toml
/// [[questions]]
/// id = 1
/// sentence = "The ___ fox ___ over the ___ dog in a ___ leap."
/// options = ["quick", "jumps", "lazy", "graceful", "slow", "sleeps"]
/// correctAnswers = ["quick", "jumps", "lazy", "graceful"]
/// ```
#[derive(Debug, Deserialize)]
struct QuestionBank {
    #[serde(default)]
    questions: Vec<Question>,
}

/// 从 TOML 文本解析题库，按文件中的顺序返回
pub fn parse_question_bank(content: &str, source_name: &str) -> Result<Vec<Question>> {
    let bank: QuestionBank = toml::from_str(content).map_err(|source| QuizError::Toml {
        path: source_name.to_string(),
        source,
    })?;

    for question in &bank.questions {
        question.validate()?;
    }

    Ok(bank.questions)
}

/// 从 TOML 文件加载题库
pub async fn load_question_bank(toml_file_path: &Path) -> Result<Vec<Question>> {
    let path_text = toml_file_path.display().to_string();
    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|source| QuizError::Io {
            path: path_text.clone(),
            source,
        })?;

    let questions = parse_question_bank(&content, &path_text)?;
    tracing::info!("成功加载 {} 道题目: {}", questions.len(), path_text);

    Ok(questions)
}
