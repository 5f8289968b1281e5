/// 题目服务客户端
///
/// 通过 REST 接口拉取题目：
/// - `GET {base}/questions/{id}` 单道题
/// - `GET {base}/questions` 全部题目
use crate::clients::source::QuestionSource;
use crate::config::Config;
use crate::error::{QuizError, Result};
use crate::models::Question;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// 题目服务客户端
#[derive(Clone)]
pub struct QuestionClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: usize,
    retry_delay: Duration,
}

impl QuestionClient {
    /// 创建新的题目服务客户端
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| QuizError::network(&config.api_base_url, e))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            max_retries: config.fetch_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET 并解析 JSON（带重试逻辑）
    ///
    /// 只有网络失败和 5xx 会重试，第 n 次重试前等待 n 倍的基础间隔。
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let endpoint = self.endpoint(path);

        let mut retry_count = 0;
        loop {
            match self.get_once(&endpoint).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && retry_count < self.max_retries => {
                    retry_count += 1;
                    warn!(
                        "请求 {} 失败 (重试 {}/{}): {}",
                        endpoint, retry_count, self.max_retries, e
                    );
                    sleep(self.retry_delay * retry_count as u32).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        debug!("GET {}", endpoint);

        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(|e| QuizError::network(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuizError::BadStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| QuizError::network(endpoint, e))?;

        serde_json::from_str(&body)
            .map_err(|e| QuizError::malformed(format!("无法解析响应 ({}): {}", endpoint, e)))
    }
}

impl QuestionSource for QuestionClient {
    async fn fetch_question(&self, index: usize) -> Result<Question> {
        let question: Question = match self.get_json(&format!("/questions/{}", index)).await {
            Err(QuizError::BadStatus { status, .. })
                if status == StatusCode::NOT_FOUND.as_u16() =>
            {
                return Err(QuizError::NotFound { index });
            }
            other => other?,
        };
        question.validate()?;
        Ok(question)
    }

    async fn fetch_all(&self) -> Result<Vec<Question>> {
        let questions: Vec<Question> = self.get_json("/questions").await?;
        for question in &questions {
            question.validate()?;
        }
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn test_config(base: &str) -> Config {
        Config {
            api_base_url: base.to_string(),
            fetch_retries: 0,
            request_timeout_secs: 1,
            ..Config::default()
        }
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = QuestionClient::new(&test_config("http://localhost:3000/")).unwrap();
        assert_eq!(
            client.endpoint("/questions/4"),
            "http://localhost:3000/questions/4"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // 端口 9 (discard) 在测试环境中不会有 HTTP 服务
        let client = QuestionClient::new(&test_config("http://127.0.0.1:9")).unwrap();
        let result = client.fetch_question(1).await;
        assert!(matches!(result, Err(QuizError::Network { .. })));
    }

    const QUESTION_JSON: &str =
        r#"{"id":7,"sentence":"A ___ day.","options":["sunny","rainy"],"correctAnswers":["sunny"]}"#;

    /// 按顺序返回预设响应的本地 HTTP 服务，最后一个响应会一直重复
    ///
    /// 返回服务地址和已收到的请求数
    async fn scripted_server(responses: Vec<(u16, &'static str)>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let (status, body) = responses[n.min(responses.len() - 1)];

                let mut request: Vec<u8> = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(read) => request.extend_from_slice(&buf[..read]),
                    }
                }

                let reason = match status {
                    200 => "OK",
                    404 => "Not Found",
                    _ => "Service Unavailable",
                };
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}", addr), hits)
    }

    fn retrying_client(base: &str, retries: usize) -> QuestionClient {
        let config = Config {
            fetch_retries: retries,
            retry_delay_ms: 1,
            ..test_config(base)
        };
        QuestionClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_retries_after_server_error() {
        let (base, hits) = scripted_server(vec![(503, ""), (200, QUESTION_JSON)]).await;
        let client = retrying_client(&base, 1);

        let question = client.fetch_question(7).await.unwrap();
        assert_eq!(question.correct_answers, vec!["sunny"]);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_question_is_not_found() {
        let (base, hits) = scripted_server(vec![(404, "")]).await;
        let client = retrying_client(&base, 3);

        let result = client.fetch_question(7).await;
        assert!(matches!(result, Err(QuizError::NotFound { index: 7 })));
        // 4xx 不重试
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let (base, hits) = scripted_server(vec![(503, "")]).await;
        let client = retrying_client(&base, 2);

        let result = client.fetch_question(7).await;
        assert!(matches!(
            result,
            Err(QuizError::BadStatus { status: 503, .. })
        ));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    /// 需要本地运行题目服务：cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn test_fetch_from_local_server() {
        let _ = tracing_subscriber::fmt::try_init();

        let client = QuestionClient::new(&Config::default()).unwrap();
        let question = client.fetch_question(1).await.expect("拉取第 1 题失败");
        assert_eq!(question.blank_count(), question.correct_answers.len());

        let all = client.fetch_all().await.expect("拉取全部题目失败");
        println!("共 {} 道题", all.len());
        assert!(!all.is_empty());
    }
}
