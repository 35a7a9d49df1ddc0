//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sns_mock_common::error::SnsError;
use uuid::Uuid;

use super::render::{self, ResponseFormat};

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub SnsError);

impl From<SnsError> for AppError {
    fn from(err: SnsError) -> Self {
        AppError(err)
    }
}

impl AppError {
    /// HTTPステータスコード
    pub fn status_code(&self) -> StatusCode {
        if self.0.is_server_fault() {
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
        match &self.0 {
            SnsError::NotFound(_) => StatusCode::NOT_FOUND,
            SnsError::Common(sns_mock_common::error::CommonError::InvalidArn(_)) => {
                StatusCode::NOT_FOUND
            }
            SnsError::InvalidParameter(_)
            | SnsError::MissingParameter(_)
            | SnsError::InvalidAction(_)
            | SnsError::Common(_) => StatusCode::BAD_REQUEST,
            SnsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 指定形式でレスポンスを生成
    pub fn render(self, format: ResponseFormat, request_id: Uuid) -> Response {
        let status = self.status_code();
        if self.0.is_server_fault() {
            // 詳細はログのみに出力
            tracing::error!(error = %self.0, %request_id, "Request failed");
        } else {
            tracing::debug!(error = %self.0, code = self.0.code(), %request_id, "Request rejected");
        }
        render::error(format, status, &self.0, request_id)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.render(ResponseFormat::Xml, Uuid::new_v4())
    }
}
