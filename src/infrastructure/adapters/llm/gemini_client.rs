//! Gemini Story Generator - 调用 Google Gemini 文本生成 API
//!
//! 实现 StoryGeneratorPort trait
//!
//! 外部 API:
//! POST {base_url}/v1beta/models/{model}:generateContent
//! Header: x-goog-api-key
//! Request: {"contents": [{"parts": [{"text": "..."}]}], "generationConfig": {...}}
//! Response: {"candidates": [{"content": {"parts": [{"text": "..."}]}}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{GenerationError, GenerationRequest, StoryGeneratorPort};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

fn not_configured() -> GenerationError {
    GenerationError::NotConfigured("Gemini API key not configured".to_string())
}

/// Gemini 客户端配置
#[derive(Debug, Clone)]
pub struct GeminiClientConfig {
    /// API Key，缺失时每次调用都返回配置错误
    pub api_key: Option<String>,
    /// API 基础 URL
    pub base_url: String,
    /// 模型 ID
    pub model: String,
    /// 最大输出 token 数
    pub max_output_tokens: u32,
    /// 采样温度
    pub temperature: f32,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GeminiClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            max_output_tokens: 8000,
            temperature: 0.7,
            timeout_secs: 120,
        }
    }
}

impl GeminiClientConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Gemini 文本生成客户端
pub struct GeminiStoryGenerator {
    client: Client,
    config: GeminiClientConfig,
}

impl GeminiStoryGenerator {
    pub fn new(config: GeminiClientConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }
}

#[async_trait]
impl StoryGeneratorPort for GeminiStoryGenerator {
    fn ensure_configured(&self) -> Result<(), GenerationError> {
        self.api_key().map(|_| ()).ok_or_else(not_configured)
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let api_key = self.api_key().ok_or_else(not_configured)?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![TextPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.config.max_output_tokens,
                temperature: self.config.temperature,
            },
        };

        tracing::debug!(
            url = %self.generate_url(),
            model = %self.config.model,
            prompt_len = request.prompt.len(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(self.generate_url())
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else if e.is_connect() {
                    GenerationError::NetworkError(format!("Cannot connect to Gemini: {}", e))
                } else {
                    GenerationError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&error_text)
                .map(|b| b.error.message)
                .unwrap_or(error_text);
            return Err(GenerationError::ServiceError(format!(
                "HTTP {}: {}",
                status, message
            )));
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout
            } else {
                GenerationError::InvalidResponse(e.to_string())
            }
        })?;

        let candidate = payload
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::InvalidResponse("No candidates returned".to_string()))?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GenerationError::InvalidResponse(format!(
                "Empty response (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        tracing::info!(
            model = %self.config.model,
            text_len = text.len(),
            finish_reason = ?candidate.finish_reason,
            "Story generation completed"
        );

        Ok(text)
    }
}
