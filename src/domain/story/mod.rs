//! Story Context - 故事限界上下文
//!
//! 职责:
//! - 孩子名字校验
//! - 生成故事的长度校验
//! - 合成音频的拼接与编码

mod errors;
mod value_objects;

pub use errors::StoryError;
pub use value_objects::{AudioPayload, ChildName, GeneratedStory, LengthBounds, LengthMetric};
