//! 选项渲染
//!
//! 已经填在某个槽位里的词渲染为禁用状态，不能再次选择。

use crate::models::AnswerSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    /// 显示序号，从 1 开始
    pub number: usize,
    pub word: String,
    pub disabled: bool,
}

pub fn render_options(options: &[String], answers: &AnswerSet) -> Vec<OptionView> {
    options
        .iter()
        .enumerate()
        .map(|(i, word)| OptionView {
            number: i + 1,
            word: word.clone(),
            disabled: answers.contains(word),
        })
        .collect()
}

/// 按序号或原词查找一个可选的选项，禁用的选项返回 `None`
pub fn resolve_pick<'a>(views: &'a [OptionView], input: &str) -> Option<&'a OptionView> {
    let input = input.trim();
    let found = match input.parse::<usize>() {
        Ok(number) => views.iter().find(|v| v.number == number),
        Err(_) => views.iter().find(|v| v.word == input),
    }?;

    (!found.disabled).then_some(found)
}

pub fn options_to_text(views: &[OptionView]) -> String {
    views
        .iter()
        .map(|v| {
            if v.disabled {
                format!("  {:>2}. {} (used)", v.number, v.word)
            } else {
                format!("  {:>2}. {}", v.number, v.word)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
