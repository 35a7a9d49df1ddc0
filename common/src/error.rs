//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! # Query API エラーレスポンス
//!
//! `SnsError`は`code()`と`fault()`メソッドを提供し、
//! SNS互換の`ErrorResponse`を生成できます。

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// ARN parse error
    #[error("Invalid ARN: {0}")]
    InvalidArn(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Notification service error type
#[derive(Debug, Error)]
pub enum SnsError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Required request parameter is missing
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    /// Unknown `Action`
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SnsError {
    /// Returns the SNS error code reported in `<Code>`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Common(CommonError::InvalidArn(_)) => "NotFound",
            Self::Common(CommonError::Config(_) | CommonError::Serialization(_)) => "InternalError",
            Self::Common(_) => "InvalidParameter",
            Self::NotFound(_) => "NotFound",
            Self::InvalidParameter(_) => "InvalidParameter",
            Self::MissingParameter(_) => "MissingParameter",
            Self::InvalidAction(_) => "InvalidAction",
            Self::Internal(_) => "InternalError",
        }
    }

    /// Returns `"Sender"` for client faults and `"Receiver"` for server faults.
    pub fn fault(&self) -> &'static str {
        if self.is_server_fault() {
            "Receiver"
        } else {
            "Sender"
        }
    }

    /// True when the failure is on the service side.
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            Self::Internal(_)
                | Self::Common(CommonError::Config(_) | CommonError::Serialization(_))
        )
    }

    /// Returns the message placed in `<Message>`.
    ///
    /// Client faults echo their detail so callers can correct the request.
    /// Server faults collapse to a generic text; the full error goes to the log.
    pub fn external_message(&self) -> String {
        match self {
            Self::Common(CommonError::InvalidArn(arn)) => format!("Resource {} does not exist", arn),
            Self::Common(CommonError::Validation(msg)) => msg.clone(),
            Self::Common(CommonError::Config(_) | CommonError::Serialization(_))
            | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            Self::NotFound(msg)
            | Self::InvalidParameter(msg)
            | Self::MissingParameter(msg)
            | Self::InvalidAction(msg) => msg.clone(),
        }
    }

    /// 存在しないリソースのエラーを作成
    pub fn not_found(what: &str, arn: &str) -> Self {
        Self::NotFound(format!("{} does not exist: {}", what, arn))
    }

    /// 必須パラメータ欠落のエラーを作成
    pub fn missing(name: &str) -> Self {
        Self::MissingParameter(format!(
            "The request must contain the parameter {}",
            name
        ))
    }
}

/// 結果型エイリアス
pub type SnsResult<T> = Result<T, SnsError>;
