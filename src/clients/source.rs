//! 题源契约
//!
//! 控制器只通过这个 trait 获取题目，HTTP 题库和本地题库都实现它。

use std::future::Future;

use crate::error::Result;
use crate::models::Question;

/// 题目来源
pub trait QuestionSource: Send + Sync + 'static {
    /// 按 1 开始的序号获取单道题
    fn fetch_question(&self, index: usize) -> impl Future<Output = Result<Question>> + Send;

    /// 获取完整的有序题目列表（计分时使用）
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Question>>> + Send;
}
