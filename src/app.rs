//! 应用入口 - 编排层
//!
//! 负责：选择题源、启动输入读取任务、把流程事件和界面输出连起来。

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use crate::clients::{LocalQuestionBank, QuestionClient, QuestionSource};
use crate::config::Config;
use crate::render::Screen;
use crate::utils::logging::log_startup;
use crate::workflow::{parse_command, Command, QuizEvent, QuizFlow, Update};

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;
        log_startup(&config);
        Ok(Self { config })
    }

    /// 运行应用主逻辑，直到用户退出
    pub async fn run(&self) -> Result<()> {
        match &self.config.question_file {
            Some(path) => {
                let bank = LocalQuestionBank::load(Path::new(path)).await?;
                info!("✓ 使用本地题库，共 {} 道题", bank.len());
                self.run_with(bank).await
            }
            None => {
                let client = QuestionClient::new(&self.config)?;
                self.run_with(client).await
            }
        }
    }

    async fn run_with<S: QuestionSource>(&self, source: S) -> Result<()> {
        let (mut flow, mut events) = QuizFlow::new(source, &self.config);
        spawn_input_reader(flow.sender());

        flow.start();
        print_screen(&flow.screen())?;

        while let Some(event) = events.recv().await {
            match flow.handle(event) {
                Update::None => {}
                Update::Timer(remaining) => print_timer(remaining)?,
                Update::Screen => print_screen(&flow.screen())?,
                Update::Quit => break,
            }
        }

        Ok(())
    }
}

/// 逐行读取 stdin 并投递命令，EOF 视为退出
fn spawn_input_reader(events: UnboundedSender<QuizEvent>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match parse_command(&line) {
                Some(command) => {
                    if events.send(QuizEvent::Command(command)).is_err() {
                        return;
                    }
                }
                None => debug!("无法识别的输入: {}", line),
            }
        }
        let _ = events.send(QuizEvent::Command(Command::Quit));
    });
}

fn print_screen(screen: &Screen) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "\n{}", "─".repeat(60))?;
    writeln!(out, "{}", screen)?;
    out.flush()
}

/// 剩余时间只在整十秒和最后五秒提示，避免刷屏
fn print_timer(remaining: u32) -> std::io::Result<()> {
    if remaining % 10 != 0 && remaining > 5 {
        return Ok(());
    }
    let mut out = std::io::stdout().lock();
    writeln!(out, "Time left: {}s", remaining)?;
    out.flush()
}
