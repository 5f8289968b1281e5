//! 答题进度控制器
//!
//! 一轮测验唯一的可变状态。所有变更都通过这里的离散转换完成：
//! 载入题目、选词、清空槽位、前进、tick、重新开始。
//!
//! 前进到结束阶段时，最后一题答案的追加和阶段切换在同一次 `&mut self`
//! 调用中完成，外部不可能观察到"已结束但最后一题答案还没进历史"的状态。

use std::mem;

use tracing::{debug, info, warn};

use crate::models::{AnswerSet, Question};
use crate::quiz::timer::{Countdown, TickOutcome, TimerState, TimerToken};

/// 题目尚未载入时的默认槽位数
pub const DEFAULT_BLANKS: usize = 4;

/// 测验阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 仍在接受作答
    Answering,
    /// 已结束，展示结果
    Finished,
}

/// 前进的触发来源
///
/// 用户点击受"所有槽位已填写"的限制，超时不受任何限制。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceTrigger {
    UserAction,
    Timeout,
}

/// 前进的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// 已进入第 n 题，需要载入该题
    Next(usize),
    /// 最后一题已记录，进入结束阶段
    Finished,
    /// 用户前进被拒绝：还有空槽位
    Blocked,
    /// 题目未载入或已结束，忽略
    Ignored,
}

/// 一次 tick 对测验的影响
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    Stale,
    Running(u32),
    /// 时间到，已按超时前进
    Expired(AdvanceOutcome),
}

/// 对外展示的运行状态快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizRunState {
    pub current_question_index: usize,
    pub time_remaining: u32,
    pub phase: Phase,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    question_count: usize,
    current_index: usize,
    question: Option<Question>,
    answers: AnswerSet,
    history: Vec<AnswerSet>,
    phase: Phase,
    timer: Countdown,
}

impl QuizSession {
    pub fn new(question_count: usize, seconds_per_question: u32) -> Self {
        Self {
            question_count,
            current_index: 1,
            question: None,
            answers: AnswerSet::empty(DEFAULT_BLANKS),
            history: Vec::with_capacity(question_count),
            phase: Phase::Answering,
            timer: Countdown::new(seconds_per_question),
        }
    }

    /// 载入第 `index` 题并开始计时
    ///
    /// 序号与当前题号不一致（例如重新开始后才返回的旧请求）、该题已载入
    /// 或已结束时忽略，返回 `None`。计时器只会在题目数据到位之后启动。
    pub fn load_question(&mut self, index: usize, question: Question) -> Option<TimerToken> {
        if self.phase == Phase::Finished || index != self.current_index || self.question.is_some() {
            warn!(
                "忽略过期的题目数据: 第 {} 题 (当前第 {} 题, 阶段 {:?})",
                index, self.current_index, self.phase
            );
            return None;
        }

        self.answers = AnswerSet::empty(question.correct_answers.len());
        info!(
            "📝 第 {}/{} 题已载入，共 {} 个空",
            index,
            self.question_count,
            self.answers.len()
        );
        self.question = Some(question);
        Some(self.timer.start())
    }

    /// 把词填进第一个空槽位
    pub fn select_word(&mut self, word: &str) -> Option<usize> {
        if !self.accepting_input() {
            return None;
        }
        let filled = self.answers.select_word(word);
        match filled {
            Some(slot) => debug!("槽位 {} 填入 '{}'", slot + 1, word),
            None => debug!("没有空槽位，忽略 '{}'", word),
        }
        filled
    }

    /// 清空槽位，越界或未在作答时返回 `false`
    pub fn clear_slot(&mut self, index: usize) -> bool {
        self.accepting_input() && self.answers.clear_slot(index)
    }

    /// 记录当前答案并前进
    pub fn advance(&mut self, trigger: AdvanceTrigger) -> AdvanceOutcome {
        if !self.accepting_input() {
            return AdvanceOutcome::Ignored;
        }
        if trigger == AdvanceTrigger::UserAction && !self.answers.is_complete() {
            debug!("还有空槽位，不能前进");
            return AdvanceOutcome::Blocked;
        }

        let slots = self.answers.len();
        let completed = mem::replace(&mut self.answers, AnswerSet::empty(slots));
        self.history.push(completed);

        if self.current_index < self.question_count {
            self.current_index += 1;
            self.question = None;
            self.timer.reset();
            info!("➡️ 前进到第 {} 题 ({:?})", self.current_index, trigger);
            AdvanceOutcome::Next(self.current_index)
        } else {
            self.phase = Phase::Finished;
            self.timer.stop();
            info!("🏁 全部 {} 题已作答 ({:?})", self.history.len(), trigger);
            AdvanceOutcome::Finished
        }
    }

    /// 处理一次计时器 tick，时间到时按超时前进
    pub fn tick(&mut self, token: TimerToken) -> TickEvent {
        match self.timer.tick(token) {
            TickOutcome::Stale => TickEvent::Stale,
            TickOutcome::Running(remaining) => TickEvent::Running(remaining),
            TickOutcome::Expired => {
                info!("⏰ 第 {} 题时间到", self.current_index);
                TickEvent::Expired(self.advance(AdvanceTrigger::Timeout))
            }
        }
    }

    /// 重新开始：回到第 1 题，清空历史
    pub fn restart(&mut self) {
        self.current_index = 1;
        self.question = None;
        self.answers = AnswerSet::empty(DEFAULT_BLANKS);
        self.history.clear();
        self.phase = Phase::Answering;
        self.timer.reset();
        info!("🔁 重新开始测验");
    }

    fn accepting_input(&self) -> bool {
        self.phase == Phase::Answering && self.question.is_some()
    }

    pub fn run_state(&self) -> QuizRunState {
        QuizRunState {
            current_question_index: self.current_index,
            time_remaining: self.timer.remaining(),
            phase: self.phase,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn question_count(&self) -> usize {
        self.question_count
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn history(&self) -> &[AnswerSet] {
        &self.history
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn time_remaining(&self) -> u32 {
        self.timer.remaining()
    }

    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index == self.question_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u32) -> Question {
        Question {
            id,
            sentence: "The ___ fox ___ over the ___ dog in a ___ leap.".to_string(),
            options: ["quick", "jumps", "lazy", "graceful", "slow", "sleeps"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            correct_answers: ["quick", "jumps", "lazy", "graceful"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    fn fill_all(session: &mut QuizSession) {
        for word in ["quick", "jumps", "lazy", "graceful"] {
            session.select_word(word);
        }
    }

    /// 让当前题目计时到 0
    fn expire(session: &mut QuizSession, token: TimerToken) -> TickEvent {
        loop {
            match session.tick(token) {
                TickEvent::Running(_) => continue,
                other => return other,
            }
        }
    }

    #[test]
    fn test_initial_state() {
        let session = QuizSession::new(10, 30);
        let state = session.run_state();
        assert_eq!(state.current_question_index, 1);
        assert_eq!(state.time_remaining, 30);
        assert_eq!(state.phase, Phase::Answering);
        assert_eq!(session.timer_state(), TimerState::Stopped);
        assert!(session.question().is_none());
    }

    #[test]
    fn test_user_advance_blocked_until_complete() {
        let mut session = QuizSession::new(10, 30);
        session.load_question(1, question(1));
        session.select_word("quick");

        assert_eq!(
            session.advance(AdvanceTrigger::UserAction),
            AdvanceOutcome::Blocked
        );
        assert!(session.history().is_empty());
        assert_eq!(session.current_index(), 1);

        session.select_word("jumps");
        session.select_word("lazy");
        session.select_word("graceful");
        assert_eq!(
            session.advance(AdvanceTrigger::UserAction),
            AdvanceOutcome::Next(2)
        );
        assert_eq!(session.history().len(), 1);
        assert!(session.history()[0].is_complete());
    }

    #[test]
    fn test_timeout_advances_with_partial_answers() {
        let mut session = QuizSession::new(10, 30);
        let token = session.load_question(1, question(1)).unwrap();
        session.select_word("quick");
        session.select_word("jumps");
        session.select_word("lazy");

        assert_eq!(
            expire(&mut session, token),
            TickEvent::Expired(AdvanceOutcome::Next(2))
        );
        assert_eq!(
            session.history()[0].to_words(),
            vec!["quick", "jumps", "lazy", ""]
        );
        // 新题未载入前计时器不运行
        assert_eq!(session.timer_state(), TimerState::Stopped);
        assert_eq!(session.time_remaining(), 30);
    }

    #[test]
    fn test_stale_tick_after_advance_is_noop() {
        let mut session = QuizSession::new(10, 30);
        let old = session.load_question(1, question(1)).unwrap();
        fill_all(&mut session);
        session.advance(AdvanceTrigger::UserAction);
        let new = session.load_question(2, question(2)).unwrap();

        assert_eq!(session.tick(old), TickEvent::Stale);
        assert_eq!(session.time_remaining(), 30);
        assert_eq!(session.tick(new), TickEvent::Running(29));
    }

    #[test]
    fn test_answer_set_sized_to_question() {
        let mut session = QuizSession::new(10, 30);
        let mut two_blanks = question(1);
        two_blanks.sentence = "A ___ and a ___.".to_string();
        two_blanks.correct_answers.truncate(2);

        session.load_question(1, two_blanks);
        assert_eq!(session.answers().len(), 2);
    }

    #[test]
    fn test_duplicate_load_does_not_restart_timer() {
        let mut session = QuizSession::new(10, 30);
        let token = session.load_question(1, question(1)).unwrap();
        session.tick(token);
        session.select_word("quick");

        assert!(session.load_question(1, question(1)).is_none());
        assert_eq!(session.time_remaining(), 29);
        assert_eq!(session.answers().used_words(), vec!["quick"]);
    }

    #[test]
    fn test_mismatched_index_is_ignored() {
        let mut session = QuizSession::new(10, 30);
        assert!(session.load_question(2, question(2)).is_none());
        assert!(session.question().is_none());
        assert_eq!(session.select_word("quick"), None);
        assert_eq!(
            session.advance(AdvanceTrigger::Timeout),
            AdvanceOutcome::Ignored
        );
    }

    #[test]
    fn test_finishing_records_final_answer_atomically() {
        let mut session = QuizSession::new(10, 30);
        for index in 1..=10 {
            session.load_question(index, question(index as u32));
            fill_all(&mut session);
            let outcome = session.advance(AdvanceTrigger::UserAction);
            if index < 10 {
                assert_eq!(outcome, AdvanceOutcome::Next(index + 1));
            } else {
                assert_eq!(outcome, AdvanceOutcome::Finished);
            }
        }

        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.history().len(), 10);
        assert_eq!(session.timer_state(), TimerState::Stopped);
        assert_eq!(session.current_index(), 10);

        // 结束后不再接受任何前进
        assert_eq!(
            session.advance(AdvanceTrigger::Timeout),
            AdvanceOutcome::Ignored
        );
        assert_eq!(session.history().len(), 10);
    }

    #[test]
    fn test_timeout_on_last_question_finishes() {
        let mut session = QuizSession::new(2, 3);
        session.load_question(1, question(1));
        fill_all(&mut session);
        session.advance(AdvanceTrigger::UserAction);

        let token = session.load_question(2, question(2)).unwrap();
        assert_eq!(
            expire(&mut session, token),
            TickEvent::Expired(AdvanceOutcome::Finished)
        );
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[1], AnswerSet::empty(4));
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut session = QuizSession::new(10, 30);
        let token = session.load_question(1, question(1)).unwrap();
        session.tick(token);
        fill_all(&mut session);
        session.advance(AdvanceTrigger::UserAction);

        session.restart();

        let state = session.run_state();
        assert_eq!(state.current_question_index, 1);
        assert_eq!(state.time_remaining, 30);
        assert_eq!(state.phase, Phase::Answering);
        assert!(session.history().is_empty());
        assert_eq!(session.answers().to_words(), vec!["", "", "", ""]);
        assert_eq!(session.tick(token), TickEvent::Stale);
    }
}
