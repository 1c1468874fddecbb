//! Prompt Template - 故事提示词模板

use super::story::ChildName;

/// 模板中的名字占位符
pub const CHILD_NAME_PLACEHOLDER: &str = "{{CHILD_NAME}}";

/// 提示词模板
///
/// 从静态文件加载，进程内只读
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate(String);

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn has_placeholder(&self) -> bool {
        self.0.contains(CHILD_NAME_PLACEHOLDER)
    }

    /// 替换所有占位符
    pub fn render(&self, child_name: &ChildName) -> String {
        self.0.replace(CHILD_NAME_PLACEHOLDER, child_name.as_str())
    }
}
