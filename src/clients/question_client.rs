/// 题目 API 客户端
///
/// 封装所有与题目服务相关的调用逻辑
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::{Question, QuestionInfo};
use crate::services::submission::SubmissionRequest;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// 题目服务能力
///
/// 工作流只依赖这个 trait，测试时可以换成内存实现
#[async_trait]
pub trait QuestionApi: Send + Sync {
    /// 拉取题目列表
    async fn list_questions(&self, user_token: &str) -> AppResult<Vec<Question>>;

    /// 拉取单个题目详情
    async fn question_info(&self, id: &str, user_token: &str) -> AppResult<QuestionInfo>;

    /// 提交答案
    async fn submit_answer(&self, request: &SubmissionRequest) -> AppResult<()>;
}

/// 基于 reqwest 的题目服务客户端
pub struct HttpQuestionClient {
    client: Client,
    base_url: String,
}

impl HttpQuestionClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// 检查状态码并解析 JSON
    async fn read_json<T: DeserializeOwned>(endpoint: &str, response: Response) -> AppResult<T> {
        let response = Self::ensure_success(endpoint, response).await?;
        let body = response.text().await?;
        debug!("响应 ({}): {}", endpoint, body);
        serde_json::from_str(&body).map_err(|e| {
            AppError::Api(ApiError::JsonParseFailed {
                endpoint: endpoint.to_string(),
                source: Box::new(e),
            })
        })
    }

    async fn ensure_success(endpoint: &str, response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.ok().filter(|m| !m.is_empty());
        Err(AppError::bad_response(endpoint, status.as_u16(), message))
    }
}

#[async_trait]
impl QuestionApi for HttpQuestionClient {
    async fn list_questions(&self, user_token: &str) -> AppResult<Vec<Question>> {
        let endpoint = self.endpoint("questions/");
        debug!("拉取题目列表: {}", endpoint);

        let response = self
            .client
            .get(&endpoint)
            .bearer_auth(user_token)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        Self::read_json(&endpoint, response).await
    }

    async fn question_info(&self, id: &str, user_token: &str) -> AppResult<QuestionInfo> {
        let endpoint = self.endpoint(&format!("questions/{}/", id));
        debug!("拉取题目详情: {}", endpoint);

        let response = self
            .client
            .get(&endpoint)
            .bearer_auth(user_token)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        Self::read_json(&endpoint, response).await
    }

    async fn submit_answer(&self, request: &SubmissionRequest) -> AppResult<()> {
        let endpoint = self.endpoint("questions/submit/");
        debug!("提交答案 Payload: id={} point={}", request.id, request.point);

        let response = self
            .client
            .post(&endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        Self::ensure_success(&endpoint, response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = Config {
            api_base_url: "https://quiz.example/api/".to_string(),
            ..Config::default()
        };
        let client = HttpQuestionClient::new(&config).unwrap();
        assert_eq!(client.endpoint("questions/q1/"), "https://quiz.example/api/questions/q1/");
    }
}
