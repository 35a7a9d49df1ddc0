//! 共通型定義
//!
//! PlatformApplication, PlatformEndpoint, Topic, PublishedMessage等のコアデータ型

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::attributes::Attributes;
use crate::error::CommonError;

/// プッシュ通知プラットフォーム
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Amazon Device Messaging
    #[serde(rename = "ADM")]
    Adm,
    /// Apple Push Notification Service
    #[serde(rename = "APNS")]
    Apns,
    /// APNS サンドボックス
    #[serde(rename = "APNS_SANDBOX")]
    ApnsSandbox,
    /// Baidu Cloud Push
    #[serde(rename = "BAIDU")]
    Baidu,
    /// Firebase Cloud Messaging（旧GCM）
    #[serde(rename = "GCM")]
    Gcm,
    /// Microsoft Push Notification Service
    #[serde(rename = "MPNS")]
    Mpns,
    /// Windows Push Notification Services
    #[serde(rename = "WNS")]
    Wns,
}

impl Platform {
    /// 全プラットフォーム
    pub const ALL: [Platform; 7] = [
        Platform::Adm,
        Platform::Apns,
        Platform::ApnsSandbox,
        Platform::Baidu,
        Platform::Gcm,
        Platform::Mpns,
        Platform::Wns,
    ];

    /// ワイヤ上の名前
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Adm => "ADM",
            Platform::Apns => "APNS",
            Platform::ApnsSandbox => "APNS_SANDBOX",
            Platform::Baidu => "BAIDU",
            Platform::Gcm => "GCM",
            Platform::Mpns => "MPNS",
            Platform::Wns => "WNS",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CommonError::Validation(format!("Invalid parameter: Platform {}", s)))
    }
}

/// プラットフォームアプリケーション
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformApplication {
    /// ARN
    pub arn: String,
    /// アプリケーション名
    pub name: String,
    /// プラットフォーム
    pub platform: Platform,
    /// 属性
    pub attributes: Attributes,
}

/// プラットフォームエンドポイント
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformEndpoint {
    /// ARN
    pub arn: String,
    /// 親アプリケーションのARN
    pub application_arn: String,
    /// デバイストークン
    pub token: String,
    /// 属性（`Enabled`, `CustomUserData` 等）
    pub attributes: Attributes,
}

impl PlatformEndpoint {
    /// `Enabled` が明示的に false でない限り配信対象
    pub fn is_enabled(&self) -> bool {
        self.attributes.get_bool("Enabled").unwrap_or(true)
    }
}

/// トピック
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Topic {
    /// ARN
    pub arn: String,
    /// トピック名
    pub name: String,
    /// 属性
    pub attributes: Attributes,
}

/// 発行先の種別
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// プラットフォームエンドポイント
    Endpoint,
    /// トピック
    Topic,
}

/// 発行済みメッセージの記録
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublishedMessage {
    /// メッセージID
    pub message_id: Uuid,
    /// 発行先ARN
    pub target_arn: String,
    /// 発行先の種別
    pub target_kind: TargetKind,
    /// 件名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// `MessageStructure`（`json` のみ意味を持つ）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_structure: Option<String>,
    /// プロトコル別の本文（`default` を含む）
    pub bodies: IndexMap<String, String>,
    /// 実際に配信される本文
    pub delivered_body: String,
    /// 配信されたか（無効化エンドポイントでは false）
    pub delivered: bool,
    /// 発行時刻
    pub published_at: DateTime<Utc>,
}
