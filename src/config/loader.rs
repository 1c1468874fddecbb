//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. GEMINI_API_KEY / ELEVENLABS_API_KEY
//! 2. 环境变量（前缀 `BEDTIME_`）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 提供方惯用的环境变量名
const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
const ELEVENLABS_API_KEY_VAR: &str = "ELEVENLABS_API_KEY";

/// 加载应用配置
///
/// # 环境变量示例
/// - `BEDTIME_SERVER__PORT=8000`
/// - `BEDTIME_STORY__LENGTH_METRIC=chars`
/// - `BEDTIME_PROMPT__TEMPLATE_PATH=/etc/bedtime/story_prompt.md`
/// - `GEMINI_API_KEY=...`
/// - `ELEVENLABS_API_KEY=...`
///
/// API Key 缺失不会导致加载失败，而是在请求时返回配置错误
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("server.cors_origins", vec!["http://localhost:3000"])?
        .set_default("prompt.template_path", "story_prompt.md")?
        .set_default("story.length_metric", "words")?
        .set_default("story.min_length", 450)?
        .set_default("story.max_length", 700)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量
    // 前缀: BEDTIME_，层级分隔符: __
    builder = builder.add_source(
        Environment::with_prefix("BEDTIME")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("server.cors_origins")
            .try_parsing(true),
    );

    // 4. 提供方惯用变量（最高优先级）
    builder = builder
        .set_override_option("gemini.api_key", non_empty_env(GEMINI_API_KEY_VAR))?
        .set_override_option(
            "elevenlabs.api_key",
            non_empty_env(ELEVENLABS_API_KEY_VAR),
        )?;

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.prompt.template_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Prompt template path cannot be empty".to_string(),
        ));
    }

    if config.story.max_length == 0 {
        return Err(ConfigError::ValidationError(
            "Story max length cannot be 0".to_string(),
        ));
    }

    config
        .story
        .length_bounds()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    if !(0.0..=2.0).contains(&config.gemini.temperature) {
        return Err(ConfigError::ValidationError(
            "Gemini temperature must be between 0.0 and 2.0".to_string(),
        ));
    }

    if config.gemini.base_url.is_empty() || config.gemini.model.is_empty() {
        return Err(ConfigError::ValidationError(
            "Gemini base URL and model cannot be empty".to_string(),
        ));
    }

    if config.elevenlabs.base_url.is_empty()
        || config.elevenlabs.voice_id.is_empty()
        || config.elevenlabs.model_id.is_empty()
        || config.elevenlabs.output_format.is_empty()
    {
        return Err(ConfigError::ValidationError(
            "ElevenLabs base URL, voice, model and output format cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("CORS Origins: {:?}", config.server.cors_origins);
    tracing::info!("Prompt Template: {}", config.prompt.template_path.display());
    tracing::info!("Gemini Model: {}", config.gemini.model);
    tracing::info!("Gemini API Key: {}", key_status(config.gemini.has_api_key()));
    tracing::info!("ElevenLabs Voice: {}", config.elevenlabs.voice_id);
    tracing::info!("ElevenLabs Model: {}", config.elevenlabs.model_id);
    tracing::info!(
        "ElevenLabs API Key: {}",
        key_status(config.elevenlabs.has_api_key())
    );
    tracing::info!(
        "Story Length: {}-{} {}",
        config.story.min_length,
        config.story.max_length,
        config.story.length_metric.unit()
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

fn key_status(present: bool) -> &'static str {
    if present {
        "configured"
    } else {
        "NOT configured"
    }
}
