//! 句子渲染
//!
//! 每个空格渲染成一个可"点击"的占位：已填写显示所填的词，否则显示 `_____`。
//! 终端里点击对应 `clear <n>` 命令，`n` 即占位上显示的序号。

use crate::models::{AnswerSet, BLANK_MARKER};

/// 空格未填写时显示的占位符
pub const EMPTY_BLANK: &str = "_____";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentencePart {
    Text(String),
    /// 第 `index` 个空格（从 0 开始）及其当前填写的词
    Blank { index: usize, word: Option<String> },
}

/// 把句子切成文本片段和空格占位
///
/// 空格数量以 `answers` 的长度为准，多出来的标记按普通文本处理。
pub fn render_sentence(sentence: &str, answers: &AnswerSet) -> Vec<SentencePart> {
    let mut parts = Vec::new();

    for (i, text) in sentence.split(BLANK_MARKER).enumerate() {
        if !text.is_empty() {
            parts.push(SentencePart::Text(text.to_string()));
        }
        if i < answers.len() {
            parts.push(SentencePart::Blank {
                index: i,
                word: answers.slot(i).map(str::to_string),
            });
        }
    }

    parts
}

/// 纯文本形式，例如 `The [1:quick] fox [2:_____] over ...`
pub fn sentence_to_text(parts: &[SentencePart]) -> String {
    parts
        .iter()
        .map(|part| match part {
            SentencePart::Text(text) => text.clone(),
            SentencePart::Blank { index, word } => {
                format!("[{}:{}]", index + 1, word.as_deref().unwrap_or(EMPTY_BLANK))
            }
        })
        .collect()
}
