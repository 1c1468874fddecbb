//! Story Generator Port - 文本生成服务抽象
//!
//! 具体实现在 infrastructure/adapters/llm

use async_trait::async_trait;
use thiserror::Error;

/// 文本生成错误
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// 未配置凭据，不会发起任何请求
    #[error("{0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 文本生成请求
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// 已替换占位符的提示词
    pub prompt: String,
}

/// Story Generator Port
#[async_trait]
pub trait StoryGeneratorPort: Send + Sync {
    /// 检查凭据是否就绪，不发起网络请求
    fn ensure_configured(&self) -> Result<(), GenerationError> {
        Ok(()) // 默认实现
    }

    /// 单次调用，不重试；返回原始生成文本
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;
}
