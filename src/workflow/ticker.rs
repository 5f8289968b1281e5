//! 每秒 tick 的后台任务
//!
//! 一个 [`TickerHandle`] 绑定一个 [`TimerToken`]，drop 时任务被中止。
//! 即便中止前已有 tick 进入队列，token 不匹配也会被会话忽略。

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::quiz::TimerToken;
use crate::workflow::quiz_flow::QuizEvent;

pub struct TickerHandle {
    token: TimerToken,
    handle: JoinHandle<()>,
}

impl TickerHandle {
    /// 启动 ticker，第一次 tick 在 `period` 之后
    pub fn spawn(token: TimerToken, period: Duration, events: UnboundedSender<QuizEvent>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if events.send(QuizEvent::Tick(token)).is_err() {
                    break;
                }
            }
        });

        Self { token, handle }
    }

    pub fn token(&self) -> TimerToken {
        self.token
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
