use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};

/// 句子中的空格标记
pub const BLANK_MARKER: &str = "___";

/// 填空题
///
/// 题目一旦拉取就不再修改。`correct_answers` 按空格从左到右的顺序给出，
/// 每个空格一个词。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default)]
    pub id: u32,
    pub sentence: String,
    pub options: Vec<String>,
    pub correct_answers: Vec<String>,
}

impl Question {
    /// 句子中空格的数量
    pub fn blank_count(&self) -> usize {
        self.sentence.matches(BLANK_MARKER).count()
    }

    /// 按空格切分句子，返回的片段数总是 `blank_count() + 1`
    pub fn segments(&self) -> Vec<&str> {
        self.sentence.split(BLANK_MARKER).collect()
    }

    /// 校验题目数据
    ///
    /// 空格数必须与正确答案数一致，且至少有一个空格和一个选项。
    pub fn validate(&self) -> Result<()> {
        let blanks = self.blank_count();
        if blanks == 0 {
            return Err(QuizError::malformed(format!(
                "第 {} 题的句子中没有空格",
                self.id
            )));
        }
        if blanks != self.correct_answers.len() {
            return Err(QuizError::malformed(format!(
                "第 {} 题有 {} 个空格，但给出了 {} 个正确答案",
                self.id,
                blanks,
                self.correct_answers.len()
            )));
        }
        if self.options.is_empty() {
            return Err(QuizError::malformed(format!("第 {} 题没有选项", self.id)));
        }
        Ok(())
    }
}
