use crate::error::{QuizError, Result};
use serde::Deserialize;
use std::path::Path;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 题目服务地址
    pub api_base_url: String,
    /// 本地 TOML 题库（设置后不再走 HTTP）
    pub question_file: Option<String>,
    /// 每轮题目数量
    pub question_count: usize,
    /// 每题限时（秒）
    pub seconds_per_question: u32,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 拉取题目失败后的最大重试次数
    pub fetch_retries: usize,
    /// 重试间隔基数（毫秒），第 n 次重试等待 n 倍
    pub retry_delay_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            question_file: None,
            question_count: 10,
            seconds_per_question: 30,
            request_timeout_secs: 10,
            fetch_retries: 3,
            retry_delay_ms: 500,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量读取配置，缺失或无法解析的值使用默认值
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件读取配置，文件中未出现的字段使用默认值
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| QuizError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| QuizError::Toml {
            path: path.display().to_string(),
            source,
        })
    }

    /// 先读 `QUIZ_CONFIG` 指向的文件（如有），再叠加环境变量
    pub fn load() -> Result<Self> {
        let base = match std::env::var("QUIZ_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        let config = base.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 校验取值范围
    pub fn validate(&self) -> Result<()> {
        if self.question_count == 0 {
            return Err(QuizError::Config("question_count 必须大于 0".to_string()));
        }
        if self.seconds_per_question == 0 {
            return Err(QuizError::Config(
                "seconds_per_question 必须大于 0".to_string(),
            ));
        }
        Ok(())
    }

    fn with_env_overrides(self) -> Self {
        Self {
            api_base_url: std::env::var("QUIZ_API_BASE_URL").unwrap_or(self.api_base_url),
            question_file: std::env::var("QUIZ_QUESTION_FILE").ok().or(self.question_file),
            question_count: env_parse("QUIZ_QUESTION_COUNT").unwrap_or(self.question_count),
            seconds_per_question: env_parse("QUIZ_SECONDS_PER_QUESTION")
                .unwrap_or(self.seconds_per_question),
            request_timeout_secs: env_parse("QUIZ_REQUEST_TIMEOUT_SECS")
                .unwrap_or(self.request_timeout_secs),
            fetch_retries: env_parse("QUIZ_FETCH_RETRIES").unwrap_or(self.fetch_retries),
            retry_delay_ms: env_parse("QUIZ_RETRY_DELAY_MS").unwrap_or(self.retry_delay_ms),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
