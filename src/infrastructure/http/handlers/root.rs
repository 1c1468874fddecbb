//! Root Handler
//!
//! 服务标识，兼作健康检查

use axum::Json;

use crate::infrastructure::http::dto::RootResponse;

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Bedtime Audiobook API",
    })
}
