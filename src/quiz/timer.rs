//! 每题倒计时
//!
//! 纯状态机，不依赖真实时钟：外部每秒调用一次 [`Countdown::tick`]。
//! 每次 [`Countdown::start`] 都会发放新的 [`TimerToken`]，旧 token 的 tick
//! 一律被忽略，因此不会出现两个计时器同时作用在同一题上。

/// 计时器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Running,
    Expired,
    Stopped,
}

/// 标识一次计时，tick 必须带着启动时拿到的 token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// 一次 tick 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// token 过期或计时器未运行，什么也没发生
    Stale,
    /// 继续倒计时，附剩余秒数
    Running(u32),
    /// 本次 tick 把剩余时间减到 0，只会出现一次
    Expired,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    duration: u32,
    remaining: u32,
    state: TimerState,
    generation: u64,
}

impl Countdown {
    /// 新建一个处于 Stopped 状态、剩余时间为满额的计时器
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration: duration_secs,
            remaining: duration_secs,
            state: TimerState::Stopped,
            generation: 0,
        }
    }

    /// 重新开始计时，之前发放的 token 全部失效
    pub fn start(&mut self) -> TimerToken {
        self.generation += 1;
        self.remaining = self.duration;
        self.state = TimerState::Running;
        TimerToken(self.generation)
    }

    /// 停止计时，剩余时间保持不变
    pub fn stop(&mut self) {
        self.generation += 1;
        self.state = TimerState::Stopped;
    }

    /// 停止并把剩余时间恢复为满额，等待下一次 `start`
    pub fn reset(&mut self) {
        self.stop();
        self.remaining = self.duration;
    }

    pub fn tick(&mut self, token: TimerToken) -> TickOutcome {
        if token.0 != self.generation || self.state != TimerState::Running {
            return TickOutcome::Stale;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = TimerState::Expired;
            TickOutcome::Expired
        } else {
            TickOutcome::Running(self.remaining)
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// 当前有效的 token（仅在运行中时）
    pub fn active_token(&self) -> Option<TimerToken> {
        (self.state == TimerState::Running).then_some(TimerToken(self.generation))
    }
}
