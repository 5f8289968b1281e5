//! 测验流程 - 流程层
//!
//! 核心职责：消费事件队列，驱动 [`QuizSession`]
//!
//! 所有状态变更都发生在 [`QuizFlow::handle`] 中，且只有一个消费者，
//! 因此不需要锁。异步部分只有两处：拉取单题、拉取全部题目，
//! 它们在后台任务中完成后以事件的形式回到队列。
//!
//! 顺序保证：
//! 1. 第 n 题的数据载入之后才启动该题的 ticker
//! 2. 换题时先丢弃旧 ticker（中止任务），残留在队列里的旧 tick 由 token 过滤
//! 3. 最后一题答案入历史与进入结束阶段是同一次转换

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::clients::QuestionSource;
use crate::config::Config;
use crate::error::Result;
use crate::models::Question;
use crate::quiz::{
    build_report, AdvanceOutcome, AdvanceTrigger, Phase, QuizSession, Report, TickEvent, TimerToken,
};
use crate::render::{render_options, resolve_pick, QuestionView, Screen};
use crate::utils::logging::{log_final_stats, truncate_text};
use crate::workflow::command::Command;
use crate::workflow::ticker::TickerHandle;

/// 流程事件
#[derive(Debug)]
pub enum QuizEvent {
    Command(Command),
    Tick(TimerToken),
    QuestionLoaded { index: usize, result: Result<Question> },
    AllQuestionsLoaded(Result<Vec<Question>>),
}

/// 处理一个事件后界面需要做什么
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    None,
    /// 只有剩余时间变化
    Timer(u32),
    /// 需要重绘整个界面
    Screen,
    Quit,
}

/// 测验流程
pub struct QuizFlow<S: QuestionSource> {
    source: Arc<S>,
    session: QuizSession,
    events: UnboundedSender<QuizEvent>,
    tick_period: Duration,
    ticker: Option<TickerHandle>,
    all_questions: Option<Vec<Question>>,
    all_questions_pending: bool,
    load_error: Option<String>,
    report_logged: bool,
}

impl<S: QuestionSource> QuizFlow<S> {
    /// 创建流程，返回事件接收端
    pub fn new(source: S, config: &Config) -> (Self, UnboundedReceiver<QuizEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let flow = Self {
            source: Arc::new(source),
            session: QuizSession::new(config.question_count, config.seconds_per_question),
            events,
            tick_period: Duration::from_secs(1),
            ticker: None,
            all_questions: None,
            all_questions_pending: false,
            load_error: None,
            report_logged: false,
        };
        (flow, receiver)
    }

    /// 事件发送端，输入读取任务用它投递命令
    pub fn sender(&self) -> UnboundedSender<QuizEvent> {
        self.events.clone()
    }

    /// 开始第一题，同时预取完整题目列表
    pub fn start(&mut self) {
        self.request_question(self.session.current_index());
        self.request_all_questions();
    }

    pub fn handle(&mut self, event: QuizEvent) -> Update {
        match event {
            QuizEvent::QuestionLoaded { index, result } => self.on_question_loaded(index, result),
            QuizEvent::AllQuestionsLoaded(result) => self.on_all_questions_loaded(result),
            QuizEvent::Tick(token) => self.on_tick(token),
            QuizEvent::Command(command) => self.on_command(command),
        }
    }

    /// 当前应展示的界面
    pub fn screen(&self) -> Screen {
        if self.session.phase() == Phase::Finished {
            return match self.report() {
                Some(report) => Screen::Results(report),
                None => Screen::ComputingResults,
            };
        }

        if let Some(view) = QuestionView::from_session(&self.session) {
            return Screen::Answering(view);
        }

        let index = self.session.current_index();
        match &self.load_error {
            Some(message) => Screen::LoadFailed {
                index,
                message: message.clone(),
            },
            None => Screen::Loading { index },
        }
    }

    /// 结束且题目列表完整时才有报告
    pub fn report(&self) -> Option<Report> {
        if self.session.phase() != Phase::Finished {
            return None;
        }
        let questions = self.all_questions.as_deref()?;
        build_report(
            self.session.history(),
            questions,
            self.session.question_count(),
        )
        .ok()
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// 当前 ticker 绑定的 token
    pub fn active_token(&self) -> Option<TimerToken> {
        self.ticker.as_ref().map(TickerHandle::token)
    }

    // ========== 事件处理 ==========

    fn on_question_loaded(&mut self, index: usize, result: Result<Question>) -> Update {
        match result {
            Ok(question) => {
                let preview = truncate_text(&question.sentence, 60);
                match self.session.load_question(index, question) {
                    Some(token) => {
                        debug!("题目: {}", preview);
                        self.load_error = None;
                        self.ticker = Some(TickerHandle::spawn(
                            token,
                            self.tick_period,
                            self.events.clone(),
                        ));
                        Update::Screen
                    }
                    None => Update::None,
                }
            }
            Err(e) => {
                let waiting_for_it = self.session.phase() == Phase::Answering
                    && self.session.current_index() == index
                    && self.session.question().is_none();
                if !waiting_for_it {
                    debug!("忽略过期的失败请求: 第 {} 题", index);
                    return Update::None;
                }
                error!("❌ 拉取第 {} 题失败: {}", index, e);
                self.load_error = Some(e.to_string());
                Update::Screen
            }
        }
    }

    fn on_all_questions_loaded(&mut self, result: Result<Vec<Question>>) -> Update {
        self.all_questions_pending = false;

        match result {
            Ok(questions) => {
                let expected = self.session.question_count();
                if questions.len() < expected {
                    warn!(
                        "⚠️ 题目列表不完整: 需要 {} 道，实际 {} 道",
                        expected,
                        questions.len()
                    );
                } else {
                    info!("✓ 已获取完整题目列表 ({} 道)", questions.len());
                }
                self.all_questions = Some(questions);
            }
            Err(e) => {
                error!("❌ 拉取完整题目列表失败: {}", e);
            }
        }

        if self.session.phase() == Phase::Finished {
            self.log_report_once();
            Update::Screen
        } else {
            Update::None
        }
    }

    fn on_tick(&mut self, token: TimerToken) -> Update {
        match self.session.tick(token) {
            TickEvent::Stale => {
                debug!("忽略过期的 tick");
                Update::None
            }
            TickEvent::Running(remaining) => Update::Timer(remaining),
            TickEvent::Expired(outcome) => self.after_advance(outcome),
        }
    }

    fn on_command(&mut self, command: Command) -> Update {
        match command {
            Command::Pick(input) => self.pick(&input),
            Command::Clear(index) => {
                if self.session.clear_slot(index) {
                    Update::Screen
                } else {
                    debug!("忽略无效的清空: 第 {} 个空", index + 1);
                    Update::None
                }
            }
            Command::Next => {
                let outcome = self.session.advance(AdvanceTrigger::UserAction);
                self.after_advance(outcome)
            }
            Command::Restart => {
                self.ticker = None;
                self.load_error = None;
                self.report_logged = false;
                self.session.restart();
                self.request_question(self.session.current_index());
                Update::Screen
            }
            Command::Retry => self.retry(),
            Command::Quit => {
                self.ticker = None;
                info!("👋 退出测验");
                Update::Quit
            }
        }
    }

    fn pick(&mut self, input: &str) -> Update {
        let Some(question) = self.session.question() else {
            return Update::None;
        };
        let views = render_options(&question.options, self.session.answers());
        let Some(option) = resolve_pick(&views, input) else {
            debug!("选项不可用: {}", input);
            return Update::None;
        };
        let word = option.word.clone();

        match self.session.select_word(&word) {
            Some(_) => Update::Screen,
            None => Update::None,
        }
    }

    fn retry(&mut self) -> Update {
        if self.load_error.take().is_some() {
            info!("🔄 重新拉取第 {} 题", self.session.current_index());
            self.request_question(self.session.current_index());
            return Update::Screen;
        }
        if self.session.phase() == Phase::Finished && !self.has_complete_list() {
            self.request_all_questions();
            return Update::Screen;
        }
        Update::None
    }

    fn after_advance(&mut self, outcome: AdvanceOutcome) -> Update {
        match outcome {
            AdvanceOutcome::Next(index) => {
                self.ticker = None;
                self.request_question(index);
                Update::Screen
            }
            AdvanceOutcome::Finished => {
                self.ticker = None;
                if self.has_complete_list() {
                    self.log_report_once();
                } else {
                    self.request_all_questions();
                }
                Update::Screen
            }
            AdvanceOutcome::Blocked | AdvanceOutcome::Ignored => Update::None,
        }
    }

    // ========== 后台请求 ==========

    fn request_question(&self, index: usize) {
        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = source.fetch_question(index).await;
            let _ = events.send(QuizEvent::QuestionLoaded { index, result });
        });
    }

    fn request_all_questions(&mut self) {
        if self.all_questions_pending {
            return;
        }
        self.all_questions_pending = true;

        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = source.fetch_all().await;
            let _ = events.send(QuizEvent::AllQuestionsLoaded(result));
        });
    }

    fn has_complete_list(&self) -> bool {
        self.all_questions
            .as_ref()
            .is_some_and(|q| q.len() >= self.session.question_count())
    }

    fn log_report_once(&mut self) {
        if self.report_logged {
            return;
        }
        if let Some(report) = self.report() {
            log_final_stats(&report);
            self.report_logged = true;
        }
    }
}
