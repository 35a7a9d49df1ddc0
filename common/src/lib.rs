//! SNS Mock Common
//!
//! モックサービスとクライアントで共有する型・プロトコル・設定

#![warn(missing_docs)]

/// ARN生成・解析
pub mod arn;

/// 属性バッグ
pub mod attributes;

/// 設定管理
pub mod config;

/// エラー型
pub mod error;

/// リクエスト／レスポンス型
pub mod protocol;

/// コアデータ型
pub mod types;
