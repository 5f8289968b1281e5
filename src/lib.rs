//! # Fill Blank Quiz
//!
//! 一个终端里的限时填空测验：依次给出若干个带空格的句子，
//! 从选项中选词填空，每题限时，最后给出成绩单。
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - `Question`、`AnswerSet`、TOML 题库加载
//!
//! ### ② 题源层（Clients）
//! - `QuestionSource` - 题源契约
//! - `QuestionClient` - HTTP 题目服务（带重试）
//! - `LocalQuestionBank` - 本地 / 内存题库
//!
//! ### ③ 状态层（Quiz）
//! - `Countdown` - 每题倒计时，token 防止旧计时器干扰
//! - `QuizSession` - 进度控制：选词、前进、超时、重新开始
//! - `build_report` - 计分与反馈
//!
//! ### ④ 流程层（Workflow）
//! - `QuizFlow` - 单消费者事件循环，负责拉题、ticker 生命周期
//! - `Command` - 用户输入解析
//!
//! ### ⑤ 展示层（Render）与编排层（App）
//! - `render/` - 无状态渲染：句子、选项、结果
//! - `App` - 连接 stdin、事件队列与 stdout
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod quiz;
pub mod render;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{LocalQuestionBank, QuestionClient, QuestionSource};
pub use config::Config;
pub use error::{QuizError, Result};
pub use models::{AnswerSet, Question};
pub use quiz::{build_report, AdvanceTrigger, Phase, QuizSession, Report};
pub use workflow::{QuizEvent, QuizFlow};
