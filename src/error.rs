use thiserror::Error;

/// 应用程序错误类型
///
/// 所有错误都不会让进程退出：网络类错误表现为持续的加载/错误界面，
/// 数据不完整表现为"结果计算中"界面。
#[derive(Debug, Error)]
pub enum QuizError {
    /// 网络请求失败（无法连接、超时、响应体读取失败）
    #[error("请求失败 ({endpoint}): {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// 服务端返回非 2xx 状态码
    #[error("服务端返回错误状态 ({endpoint}): {status}")]
    BadStatus { endpoint: String, status: u16 },

    /// 题目数据不合法
    #[error("题目数据不合法: {reason}")]
    Malformed { reason: String },

    /// 题源中不存在该序号的题目
    #[error("找不到第 {index} 题")]
    NotFound { index: usize },

    /// 题目列表不完整，无法计分
    #[error("题目列表不完整: 需要 {expected} 道，实际 {actual} 道")]
    DataIncomplete { expected: usize, actual: usize },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 文件读写错误
    #[error("文件错误 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl QuizError {
    /// 创建网络请求失败错误
    pub fn network(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        QuizError::Network {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 创建题目数据不合法错误
    pub fn malformed(reason: impl Into<String>) -> Self {
        QuizError::Malformed {
            reason: reason.into(),
        }
    }

    /// 是否值得重试（只有网络层面的失败才重试）
    pub fn is_retryable(&self) -> bool {
        match self {
            QuizError::Network { .. } => true,
            QuizError::BadStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// 应用程序结果类型
pub type Result<T> = std::result::Result<T, QuizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        let server_error = QuizError::BadStatus {
            endpoint: "/questions/1".to_string(),
            status: 503,
        };
        let client_error = QuizError::BadStatus {
            endpoint: "/questions/1".to_string(),
            status: 404,
        };

        assert!(server_error.is_retryable());
        assert!(!client_error.is_retryable());
        assert!(!QuizError::malformed("no blanks").is_retryable());
        assert!(!QuizError::NotFound { index: 3 }.is_retryable());
    }

    #[test]
    fn test_display_messages() {
        let err = QuizError::DataIncomplete {
            expected: 10,
            actual: 7,
        };
        assert_eq!(err.to_string(), "题目列表不完整: 需要 10 道，实际 7 道");
    }
}
