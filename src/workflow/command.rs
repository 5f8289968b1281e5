//! 用户输入解析
//!
//! 一行输入对应一个命令；不带关键字的输入视为选词。

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 按序号或原词选一个选项
    Pick(String),
    /// 清空第 n 个空（从 0 开始）
    Clear(usize),
    /// Next / Submit
    Next,
    Restart,
    /// 重新拉取失败的数据
    Retry,
    Quit,
}

fn command_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\S+)(?:\s+(.+?))?\s*$").expect("command regex"))
}

/// 解析一行输入，空行或无法识别的输入返回 `None`
pub fn parse_command(line: &str) -> Option<Command> {
    let caps = command_regex().captures(line)?;
    let head = caps.get(1)?.as_str();
    let arg = caps.get(2).map(|m| m.as_str());

    match (head.to_lowercase().as_str(), arg) {
        ("next" | "n" | "submit" | "s", None) => Some(Command::Next),
        ("restart", None) => Some(Command::Restart),
        ("retry", None) => Some(Command::Retry),
        ("quit" | "q" | "exit", None) => Some(Command::Quit),
        ("pick" | "p", Some(word)) => Some(Command::Pick(word.to_string())),
        ("clear" | "c", Some(n)) => n
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .map(Command::Clear),
        (_, None) => Some(Command::Pick(head.to_string())),
        _ => None,
    }
}
