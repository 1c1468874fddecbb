//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::{LengthBounds, LengthMetric, StoryError};
use crate::infrastructure::adapters::{ElevenLabsClientConfig, GeminiClientConfig};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 提示词模板配置
    #[serde(default)]
    pub prompt: PromptConfig,

    /// Gemini 文本生成配置
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// ElevenLabs 语音合成配置
    #[serde(default)]
    pub elevenlabs: ElevenLabsConfig,

    /// 故事长度校验配置
    #[serde(default)]
    pub story: StoryConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 允许跨域的前端来源
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// 提示词模板配置
#[derive(Debug, Clone, Deserialize)]
pub struct PromptConfig {
    /// 模板文件路径（包含 {{CHILD_NAME}} 占位符）
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,
}

fn default_template_path() -> PathBuf {
    PathBuf::from("story_prompt.md")
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            template_path: default_template_path(),
        }
    }
}

/// Gemini 配置
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// API Key（也可通过 GEMINI_API_KEY 设置）
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_gemini_url")]
    pub base_url: String,

    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// 最大输出 token 数
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// 采样温度，偏向连贯
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// 请求超时时间（秒）
    #[serde(default = "default_gemini_timeout")]
    pub timeout_secs: u64,
}

fn default_gemini_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_max_output_tokens() -> u32 {
    8000
}

fn default_temperature() -> f32 {
    0.7
}

fn default_gemini_timeout() -> u64 {
    120
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_url(),
            model: default_gemini_model(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_gemini_timeout(),
        }
    }
}

impl GeminiConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    pub fn client_config(&self) -> GeminiClientConfig {
        GeminiClientConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            max_output_tokens: self.max_output_tokens,
            temperature: self.temperature,
            timeout_secs: self.timeout_secs,
        }
    }
}

/// ElevenLabs 配置
#[derive(Debug, Clone, Deserialize)]
pub struct ElevenLabsConfig {
    /// API Key（也可通过 ELEVENLABS_API_KEY 设置）
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_elevenlabs_url")]
    pub base_url: String,

    /// 音色 ID
    #[serde(default = "default_voice_id")]
    pub voice_id: String,

    /// 合成模型 ID
    #[serde(default = "default_tts_model")]
    pub model_id: String,

    /// 输出格式，如 mp3_44100_128
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_elevenlabs_timeout")]
    pub timeout_secs: u64,
}

fn default_elevenlabs_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_voice_id() -> String {
    "21m00Tcm4TlvDq8ikWAM".to_string() // Rachel
}

fn default_tts_model() -> String {
    "eleven_multilingual_v2".to_string()
}

fn default_output_format() -> String {
    "mp3_44100_128".to_string()
}

fn default_elevenlabs_timeout() -> u64 {
    180
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_elevenlabs_url(),
            voice_id: default_voice_id(),
            model_id: default_tts_model(),
            output_format: default_output_format(),
            timeout_secs: default_elevenlabs_timeout(),
        }
    }
}

impl ElevenLabsConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    pub fn client_config(&self) -> ElevenLabsClientConfig {
        ElevenLabsClientConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            voice_id: self.voice_id.clone(),
            model_id: self.model_id.clone(),
            output_format: self.output_format.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

/// 故事长度校验配置
#[derive(Debug, Clone, Deserialize)]
pub struct StoryConfig {
    /// 度量方式: words | chars
    #[serde(default)]
    pub length_metric: LengthMetric,

    #[serde(default = "default_min_length")]
    pub min_length: usize,

    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

fn default_min_length() -> usize {
    450
}

fn default_max_length() -> usize {
    700 // 目标 650 词，留一点余量
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            length_metric: LengthMetric::default(),
            min_length: default_min_length(),
            max_length: default_max_length(),
        }
    }
}

impl StoryConfig {
    pub fn length_bounds(&self) -> Result<LengthBounds, StoryError> {
        LengthBounds::new(self.length_metric, self.min_length, self.max_length)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.prompt.template_path, PathBuf::from("story_prompt.md"));
        assert_eq!(config.story.length_metric, LengthMetric::Words);
        assert_eq!(config.story.min_length, 450);
        assert_eq!(config.story.max_length, 700);
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let mut gemini = GeminiConfig::default();
        assert!(!gemini.has_api_key());
        gemini.api_key = Some("  ".to_string());
        assert!(!gemini.has_api_key());
        gemini.api_key = Some("abc".to_string());
        assert!(gemini.has_api_key());
    }

    #[test]
    fn test_length_bounds_from_config() {
        let story = StoryConfig {
            length_metric: LengthMetric::Chars,
            min_length: 2000,
            max_length: 4000,
        };
        let bounds = story.length_bounds().unwrap();
        assert_eq!(bounds.metric(), LengthMetric::Chars);
        assert_eq!(bounds.min(), 2000);
        assert_eq!(bounds.max(), 4000);
    }

    #[test]
    fn test_client_configs_carry_provider_settings() {
        let mut config = AppConfig::default();
        config.elevenlabs.voice_id = "voice-x".to_string();
        config.gemini.temperature = 0.4;

        assert_eq!(config.elevenlabs.client_config().voice_id, "voice-x");
        assert_eq!(config.gemini.client_config().temperature, 0.4);
    }
}
