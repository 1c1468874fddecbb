//! HTTP Routes
//!
//! API Endpoints:
//! - /          GET   服务标识 / 健康检查
//! - /generate  POST  生成有声故事

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/generate", post(handlers::generate))
}
