//! Generate HTTP Handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::application::GenerateAudiobook;
use crate::infrastructure::http::dto::{GenerateRequest, StoryResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 生成有声故事
pub async fn generate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<StoryResponse>, ApiError> {
    let Json(request) = payload?;

    let command = GenerateAudiobook {
        child_name: request.child_name,
    };

    let result = state.generate_handler.handle(command).await?;

    Ok(Json(result.into()))
}
