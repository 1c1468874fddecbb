//! Bedtime - 个性化睡前有声故事服务
//!
//! 名字 → Gemini 生成故事 → ElevenLabs 合成语音 → JSON 返回

use std::sync::Arc;

use bedtime::config::{load_config, print_config, LogConfig};
use bedtime::infrastructure::adapters::{
    ElevenLabsSynthesizer, FileTemplateStore, GeminiStoryGenerator,
};
use bedtime::infrastructure::http::{AppState, HttpServer, ServerConfig};

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},bedtime={},tower_http=debug", log.level, log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 不存在时忽略
    let dotenv = dotenvy::dotenv();

    // 加载配置（优先级：API Key 变量 > 环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Bedtime - 睡前有声故事服务");
    if let Ok(path) = dotenv {
        tracing::info!("Loaded environment from {}", path.display());
    }
    print_config(&config);

    if !config.gemini.has_api_key() {
        tracing::warn!("GEMINI_API_KEY is not set, /generate will fail until it is configured");
    }
    if !config.elevenlabs.has_api_key() {
        tracing::warn!("ELEVENLABS_API_KEY is not set, /generate will fail until it is configured");
    }

    let length_bounds = config.story.length_bounds()?;

    // 提供方客户端只在启动时创建一次
    let template_store = Arc::new(FileTemplateStore::new(&config.prompt.template_path));
    let story_generator = Arc::new(GeminiStoryGenerator::new(config.gemini.client_config())?);
    let speech_synthesizer =
        Arc::new(ElevenLabsSynthesizer::new(config.elevenlabs.client_config())?);

    let state = AppState::new(
        template_store,
        story_generator,
        speech_synthesizer,
        length_bounds,
    );

    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_cors_origins(config.server.cors_origins.clone());
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
