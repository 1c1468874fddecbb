//! 应用层错误定义
//!
//! 请求边界按错误种类选择 HTTP 状态码

use thiserror::Error;

use crate::application::ports::{GenerationError, SynthesisError, TemplateError};
use crate::domain::StoryError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 请求字段非法（用户可修正）
    #[error("{0}")]
    ValidationError(String),

    /// 缺少提供方凭据（需运维修正）
    #[error("{0}")]
    ConfigurationError(String),

    /// 生成文本超出长度区间
    #[error("{0}")]
    GenerationOutOfRange(String),

    /// 文本生成调用失败
    #[error("Story generation failed: {0}")]
    GenerationFailed(String),

    /// 语音合成调用失败
    #[error("Audio generation failed: {0}")]
    SynthesisFailed(String),

    /// 模板加载失败
    #[error("Failed to load story prompt: {0}")]
    TemplateError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建配置错误
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError(message.into())
    }
}

impl From<StoryError> for ApplicationError {
    fn from(err: StoryError) -> Self {
        match err {
            StoryError::EmptyChildName => Self::ValidationError(err.to_string()),
            StoryError::TooShort { .. } | StoryError::TooLong { .. } => {
                Self::GenerationOutOfRange(err.to_string())
            }
            StoryError::InvalidBounds(_) => Self::ConfigurationError(err.to_string()),
        }
    }
}

impl From<GenerationError> for ApplicationError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::NotConfigured(msg) => Self::ConfigurationError(msg),
            other => Self::GenerationFailed(other.to_string()),
        }
    }
}

impl From<SynthesisError> for ApplicationError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::NotConfigured(msg) => Self::ConfigurationError(msg),
            other => Self::SynthesisFailed(other.to_string()),
        }
    }
}

impl From<TemplateError> for ApplicationError {
    fn from(err: TemplateError) -> Self {
        Self::TemplateError(err.to_string())
    }
}
