//! Speech Synthesizer Port - 语音合成服务抽象
//!
//! 合成结果是有限的二进制分块流，调用方按顺序全部读完后再继续

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use thiserror::Error;

use crate::domain::AudioPayload;

/// 语音合成错误
#[derive(Debug, Clone, Error)]
pub enum SynthesisError {
    /// 未配置凭据，不会发起任何请求
    #[error("{0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Stream error: {0}")]
    StreamError(String),
}

/// 音频分块流（按交付顺序）
pub type AudioChunkStream = BoxStream<'static, Result<Bytes, SynthesisError>>;

/// 语音合成请求
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// 通过长度校验的故事文本
    pub text: String,
}

/// Speech Synthesizer Port
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<AudioChunkStream, SynthesisError>;
}

/// 读完整个分块流并按顺序拼接
///
/// 任一分块失败则整体失败，不返回部分音频
pub async fn collect_audio(mut stream: AudioChunkStream) -> Result<AudioPayload, SynthesisError> {
    let mut payload = AudioPayload::default();
    let mut chunks = 0usize;

    while let Some(chunk) = stream.next().await {
        payload.append(&chunk?);
        chunks += 1;
    }

    tracing::debug!(chunks, audio_size = payload.len(), "Audio stream drained");

    Ok(payload)
}
