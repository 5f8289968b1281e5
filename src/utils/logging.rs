/// 日志工具模块
///
/// 日志写到 stderr，stdout 留给答题界面。
use crate::config::Config;
use crate::quiz::Report;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则默认 `info`，详细模式下为 `debug`。
/// 重复调用不会出错（测试中可以多次调用）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 填空测验启动");
    match &config.question_file {
        Some(path) => info!("📁 题库文件: {}", path),
        None => info!("🌐 题目服务: {}", config.api_base_url),
    }
    info!(
        "📊 共 {} 题，每题 {} 秒",
        config.question_count, config.seconds_per_question
    );
    info!("{}", "=".repeat(60));
}

/// 打印最终成绩
pub fn log_final_stats(report: &Report) {
    info!("{}", "=".repeat(60));
    info!("📊 测验完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 得分: {}/{}", report.score, report.total_questions);
    info!("❌ 错误: {}", report.total_questions - report.score);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
