//! Domain Layer - 领域层
//!
//! - Story Context: 名字、故事长度、音频载荷
//! - Prompt: 提示词模板渲染

pub mod story;

mod prompt;

pub use prompt::{PromptTemplate, CHILD_NAME_PLACEHOLDER};
pub use story::{AudioPayload, ChildName, GeneratedStory, LengthBounds, LengthMetric, StoryError};
