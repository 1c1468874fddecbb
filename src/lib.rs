//! Bedtime - 个性化睡前有声故事服务
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Story Context: 名字校验、长度校验、音频载荷
//! - Prompt: 提示词模板
//!
//! 应用层 (application/):
//! - Ports: StoryGenerator, SpeechSynthesizer, PromptTemplate
//! - Commands: GenerateAudiobook 流水线
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: GET / 与 POST /generate
//! - Adapters: Gemini、ElevenLabs、模板文件

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
