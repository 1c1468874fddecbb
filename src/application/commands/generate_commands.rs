//! Generate Commands - 有声故事生成命令

use crate::domain::{AudioPayload, GeneratedStory};

/// 生成有声故事命令
#[derive(Debug, Clone)]
pub struct GenerateAudiobook {
    /// 原始输入，未去空白
    pub child_name: String,
}

/// 生成结果：故事原文 + base64 音频
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateAudiobookResponse {
    pub story_text: String,
    pub audio_base64: String,
}

impl GenerateAudiobookResponse {
    /// 响应编码：音频转 base64，文本原样保留
    pub fn encode(story: GeneratedStory, audio: &AudioPayload) -> Self {
        Self {
            story_text: story.into_text(),
            audio_base64: audio.to_base64(),
        }
    }
}
