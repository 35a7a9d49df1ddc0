//! 管理API（テスト用）
//!
//! 状態リセット、ヘルスチェック、発行ログの参照

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sns_mock_common::types::PublishedMessage;
use tracing::info;

use crate::AppState;

/// POST /_mock/reset
pub async fn reset(State(state): State<AppState>) -> StatusCode {
    state.backend.reset().await;
    info!("Mock state reset via admin API");
    StatusCode::NO_CONTENT
}

/// GET /_mock/health
pub async fn health() -> &'static str {
    "ok"
}

/// 発行ログの絞り込み条件
#[derive(Debug, Default, Deserialize)]
pub struct MessagesQuery {
    /// 発行先ARN
    pub target_arn: Option<String>,
}

/// GET /_mock/messages
pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<MessagesQuery>,
) -> Json<Vec<PublishedMessage>> {
    let messages = match query.target_arn {
        Some(arn) => state.backend.published_messages_for(&arn).await,
        None => state.backend.published_messages().await,
    };
    Json(messages)
}
