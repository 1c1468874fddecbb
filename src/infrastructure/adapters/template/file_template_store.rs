//! Template Stores - 提示词模板来源实现

use async_trait::async_trait;
use std::path::PathBuf;

use crate::application::ports::{PromptTemplatePort, TemplateError};
use crate::domain::PromptTemplate;

/// 从文件读取模板，每次请求重新读取
pub struct FileTemplateStore {
    path: PathBuf,
}

impl FileTemplateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PromptTemplatePort for FileTemplateStore {
    async fn load(&self) -> Result<PromptTemplate, TemplateError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TemplateError::NotFound(self.path.display().to_string())
            } else {
                TemplateError::Io(format!("{}: {}", self.path.display(), e))
            }
        })?;

        tracing::debug!(
            path = %self.path.display(),
            size = content.len(),
            "Prompt template loaded"
        );

        Ok(PromptTemplate::new(content))
    }
}

/// 内存中的固定模板
pub struct StaticTemplateStore {
    template: Result<PromptTemplate, TemplateError>,
}

impl StaticTemplateStore {
    pub fn new(template: PromptTemplate) -> Self {
        Self {
            template: Ok(template),
        }
    }

    pub fn failing(error: TemplateError) -> Self {
        Self {
            template: Err(error),
        }
    }
}

#[async_trait]
impl PromptTemplatePort for StaticTemplateStore {
    async fn load(&self) -> Result<PromptTemplate, TemplateError> {
        self.template.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Once upon a time, {{{{CHILD_NAME}}}} ...").unwrap();

        let store = FileTemplateStore::new(file.path());
        let template = store.load().await.unwrap();

        assert_eq!(template.as_str(), "Once upon a time, {{CHILD_NAME}} ...");
        assert!(template.has_placeholder());
    }

    #[tokio::test]
    async fn test_file_is_reread_per_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("story_prompt.md");
        std::fs::write(&path, "first {{CHILD_NAME}}").unwrap();

        let store = FileTemplateStore::new(&path);
        assert_eq!(store.load().await.unwrap().as_str(), "first {{CHILD_NAME}}");

        std::fs::write(&path, "second {{CHILD_NAME}}").unwrap();
        assert_eq!(store.load().await.unwrap().as_str(), "second {{CHILD_NAME}}");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTemplateStore::new(dir.path().join("missing.md"));

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(_)));
    }
}
