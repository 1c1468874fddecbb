//! Template Adapter - 提示词模板存储

mod file_template_store;

pub use file_template_store::{FileTemplateStore, StaticTemplateStore};
