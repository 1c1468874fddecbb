//! ElevenLabs Synthesizer - 调用 ElevenLabs 流式 TTS API
//!
//! 实现 SpeechSynthesizerPort trait
//!
//! 外部 API:
//! POST {base_url}/v1/text-to-speech/{voice_id}/stream?output_format=mp3_44100_128
//! Header: xi-api-key
//! Request: {"text": "...", "model_id": "eleven_multilingual_v2"}  (JSON)
//! Response: chunked audio/mpeg

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{
    AudioChunkStream, SpeechSynthesizerPort, SynthesisError, SynthesisRequest,
};

const XI_API_KEY_HEADER: &str = "xi-api-key";

/// TTS 请求体 (JSON)
#[derive(Debug, Serialize)]
struct TextToSpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

/// ElevenLabs 客户端配置
#[derive(Debug, Clone)]
pub struct ElevenLabsClientConfig {
    /// API Key，缺失时每次调用都返回配置错误
    pub api_key: Option<String>,
    /// API 基础 URL
    pub base_url: String,
    /// 音色 ID（默认 Rachel，温和平静）
    pub voice_id: String,
    /// 合成模型 ID
    pub model_id: String,
    /// 输出编码与码率
    pub output_format: String,
    /// 请求超时时间（秒），包含读取完整音频
    pub timeout_secs: u64,
}

impl Default for ElevenLabsClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.elevenlabs.io".to_string(),
            voice_id: "21m00Tcm4TlvDq8ikWAM".to_string(),
            model_id: "eleven_multilingual_v2".to_string(),
            output_format: "mp3_44100_128".to_string(),
            timeout_secs: 180,
        }
    }
}

impl ElevenLabsClientConfig {
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

/// ElevenLabs 语音合成客户端
pub struct ElevenLabsSynthesizer {
    client: Client,
    config: ElevenLabsClientConfig,
}

impl ElevenLabsSynthesizer {
    pub fn new(config: ElevenLabsClientConfig) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SynthesisError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn stream_url(&self) -> String {
        format!(
            "{}/v1/text-to-speech/{}/stream",
            self.config.base_url.trim_end_matches('/'),
            self.config.voice_id
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
impl SpeechSynthesizerPort for ElevenLabsSynthesizer {
    async fn synthesize(
        &self,
        request: SynthesisRequest,
    ) -> Result<AudioChunkStream, SynthesisError> {
        let api_key = self.api_key().ok_or_else(|| {
            SynthesisError::NotConfigured("ElevenLabs API key not configured".to_string())
        })?;

        tracing::debug!(
            url = %self.stream_url(),
            voice_id = %self.config.voice_id,
            model_id = %self.config.model_id,
            text_len = request.text.len(),
            "Sending text-to-speech request"
        );

        let response = self
            .client
            .post(self.stream_url())
            .query(&[("output_format", self.config.output_format.as_str())])
            .header(XI_API_KEY_HEADER, api_key)
            .json(&TextToSpeechRequest {
                text: &request.text,
                model_id: &self.config.model_id,
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SynthesisError::Timeout
                } else if e.is_connect() {
                    SynthesisError::NetworkError(format!("Cannot connect to ElevenLabs: {}", e))
                } else {
                    SynthesisError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SynthesisError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let stream = response.bytes_stream().map(|chunk| {
            chunk.map_err(|e| {
                if e.is_timeout() {
                    SynthesisError::Timeout
                } else {
                    SynthesisError::StreamError(e.to_string())
                }
            })
        });

        Ok(stream.boxed())
    }
}
