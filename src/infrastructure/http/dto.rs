//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::GenerateAudiobookResponse;

/// GET / 响应
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// POST /generate 请求
///
/// 缺少 child_name 时视为空字符串，交由校验返回 400
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub child_name: String,
}

/// POST /generate 响应
#[derive(Debug, Serialize)]
pub struct StoryResponse {
    pub story_text: String,
    pub audio_base64: String,
}

impl From<GenerateAudiobookResponse> for StoryResponse {
    fn from(response: GenerateAudiobookResponse) -> Self {
        Self {
            story_text: response.story_text,
            audio_base64: response.audio_base64,
        }
    }
}
