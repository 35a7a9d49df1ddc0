//! HTTP APIハンドラー
//!
//! SNS Query API とテスト用の管理API

pub mod admin;
pub mod error;
pub mod params;
pub mod query;
pub mod render;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// APIルーターを作成
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(query::handle_get).post(query::handle_post))
        .route("/_mock/reset", post(admin::reset))
        .route("/_mock/health", get(admin::health))
        .route("/_mock/messages", get(admin::list_messages))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
