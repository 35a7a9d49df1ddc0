//! 通信プロトコル定義
//!
//! クライアント↔モックサービス間のリクエスト／レスポンス
//!
//! レスポンス型のフィールド名は SNS の `...Result` 要素名（PascalCase）で
//! シリアライズされる。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attributes::Attributes;
use crate::types::Platform;

/// プラットフォームアプリケーション作成リクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePlatformApplicationRequest {
    /// アプリケーション名
    pub name: String,
    /// プラットフォーム
    pub platform: Platform,
    /// 初期属性
    pub attributes: Attributes,
}

impl CreatePlatformApplicationRequest {
    /// 属性なしのリクエストを作成
    pub fn new(name: impl Into<String>, platform: Platform) -> Self {
        Self {
            name: name.into(),
            platform,
            attributes: Attributes::new(),
        }
    }

    /// 初期属性を設定
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// プラットフォームエンドポイント作成リクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePlatformEndpointRequest {
    /// 親アプリケーションのARN
    pub platform_application_arn: String,
    /// デバイストークン
    pub token: String,
    /// `CustomUserData` パラメータ
    pub custom_user_data: Option<String>,
    /// 初期属性
    pub attributes: Attributes,
}

impl CreatePlatformEndpointRequest {
    /// 最小構成のリクエストを作成
    pub fn new(platform_application_arn: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            platform_application_arn: platform_application_arn.into(),
            token: token.into(),
            custom_user_data: None,
            attributes: Attributes::new(),
        }
    }

    /// `CustomUserData` を設定
    pub fn with_custom_user_data(mut self, data: impl Into<String>) -> Self {
        self.custom_user_data = Some(data.into());
        self
    }

    /// 初期属性を設定
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// メッセージ発行リクエスト
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishRequest {
    /// エンドポイントARN
    pub target_arn: Option<String>,
    /// トピックARN
    pub topic_arn: Option<String>,
    /// 本文
    pub message: String,
    /// `json` の場合、本文はプロトコル別本文のJSONオブジェクト
    pub message_structure: Option<String>,
    /// 件名
    pub subject: Option<String>,
}

impl PublishRequest {
    /// エンドポイント宛の発行リクエスト
    pub fn to_target(target_arn: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            target_arn: Some(target_arn.into()),
            message: message.into(),
            ..Default::default()
        }
    }

    /// トピック宛の発行リクエスト
    pub fn to_topic(topic_arn: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            topic_arn: Some(topic_arn.into()),
            message: message.into(),
            ..Default::default()
        }
    }

    /// `MessageStructure` を設定
    pub fn with_message_structure(mut self, structure: impl Into<String>) -> Self {
        self.message_structure = Some(structure.into());
        self
    }

    /// 件名を設定
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

/// CreatePlatformApplication の結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CreatePlatformApplicationResponse {
    /// 生成されたARN
    pub platform_application_arn: String,
}

/// 一覧中のアプリケーション
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PlatformApplicationSummary {
    /// ARN
    pub platform_application_arn: String,
    /// 属性
    pub attributes: Attributes,
}

/// ListPlatformApplications の結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ListPlatformApplicationsResponse {
    /// アプリケーション一覧
    pub platform_applications: Vec<PlatformApplicationSummary>,
    /// 次ページのトークン
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// CreatePlatformEndpoint の結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CreateEndpointResponse {
    /// 生成されたARN
    pub endpoint_arn: String,
}

/// 一覧中のエンドポイント
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct EndpointSummary {
    /// ARN
    pub endpoint_arn: String,
    /// 属性
    pub attributes: Attributes,
}

/// ListEndpointsByPlatformApplication の結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ListEndpointsByPlatformApplicationResponse {
    /// エンドポイント一覧
    pub endpoints: Vec<EndpointSummary>,
    /// 次ページのトークン
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// Get*Attributes の結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct AttributesResponse {
    /// 属性
    pub attributes: Attributes,
}

/// Publish の結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PublishResponse {
    /// メッセージID
    pub message_id: Uuid,
}

/// CreateTopic の結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTopicResponse {
    /// 生成されたARN
    pub topic_arn: String,
}

/// 一覧中のトピック
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct TopicSummary {
    /// ARN
    pub topic_arn: String,
}

/// ListTopics の結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ListTopicsResponse {
    /// トピック一覧
    pub topics: Vec<TopicSummary>,
    /// 次ページのトークン
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}
