//! Prompt Template Port - 提示词模板来源

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::PromptTemplate;

/// 模板加载错误
#[derive(Debug, Clone, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Failed to read template: {0}")]
    Io(String),
}

/// Prompt Template Port
///
/// 每次请求都可能重新加载，不保证缓存
#[async_trait]
pub trait PromptTemplatePort: Send + Sync {
    async fn load(&self) -> Result<PromptTemplate, TemplateError>;
}
