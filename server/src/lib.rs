//! SNS mock server
//!
//! プラットフォームアプリケーション／エンドポイントAPIのメモリ内モック

#![warn(missing_docs)]

/// HTTP APIハンドラー（Query API・管理API）
pub mod api;

/// CLIインターフェース
pub mod cli;

/// ロギング初期化ユーティリティ
pub mod logging;

/// メッセージ発行
pub mod publish;

/// リソース登録管理
pub mod registry;

/// axumサーバー起動
pub mod server;

/// Shutdown controller
pub mod shutdown;

use sns_mock_common::config::MockConfig;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// モックSNSバックエンド
    pub backend: registry::SnsBackend,

    /// Cooperative shutdown controller
    pub shutdown: shutdown::ShutdownController,
}

impl AppState {
    /// 設定からアプリケーション状態を作成
    pub fn new(config: &MockConfig) -> Self {
        Self {
            backend: registry::SnsBackend::new(config),
            shutdown: shutdown::ShutdownController::default(),
        }
    }
}
