//! メッセージ発行
//!
//! 発行先（エンドポイント／トピック）を解決し、配信本文を決めて記録する。
//! 実際の外部配信は行わない。

use chrono::Utc;
use indexmap::IndexMap;
use serde_json::Value;
use sns_mock_common::{
    arn::{Arn, ArnResource},
    error::{SnsError, SnsResult},
    protocol::{PublishRequest, PublishResponse},
    types::{PublishedMessage, TargetKind},
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::registry::{BackendState, ResourceKind, SnsBackend};

/// 本文の最大サイズ（バイト）
pub const MAX_MESSAGE_BYTES: usize = 256 * 1024;

/// プロトコル別本文のフォールバックキー
pub const DEFAULT_PROTOCOL: &str = "default";

/// 発行ログ
#[derive(Debug, Default)]
pub struct PublishLog {
    messages: Vec<PublishedMessage>,
}

impl PublishLog {
    /// メッセージを記録
    pub fn record(&mut self, message: PublishedMessage) {
        self.messages.push(message);
    }

    /// 発行順の全件
    pub fn all(&self) -> &[PublishedMessage] {
        &self.messages
    }

    /// 指定ARN宛のメッセージ
    pub fn for_target(&self, arn: &str) -> Vec<PublishedMessage> {
        self.messages
            .iter()
            .filter(|m| m.target_arn == arn)
            .cloned()
            .collect()
    }
}

/// 本文をプロトコル別に分解
///
/// `MessageStructure=json` でJSONオブジェクトが与えられた場合は各キーを本文とし、
/// `default` キーを必須とする。JSONオブジェクトとして解釈できない本文は
/// そのまま `default` として扱う。
pub fn split_bodies(
    message: &str,
    message_structure: Option<&str>,
) -> SnsResult<IndexMap<String, String>> {
    let mut bodies = IndexMap::new();

    match message_structure {
        None => {
            bodies.insert(DEFAULT_PROTOCOL.to_string(), message.to_string());
        }
        Some("json") => match serde_json::from_str::<Value>(message) {
            Ok(Value::Object(map)) => {
                for (protocol, body) in map {
                    let body = match body {
                        Value::String(text) => text,
                        other => other.to_string(),
                    };
                    bodies.insert(protocol, body);
                }
                if !bodies.contains_key(DEFAULT_PROTOCOL) {
                    return Err(SnsError::InvalidParameter(
                        "Invalid parameter: Message Structure - No default entry in JSON message body"
                            .to_string(),
                    ));
                }
            }
            _ => {
                warn!("MessageStructure is json but Message is not a JSON object; using it as the default body");
                bodies.insert(DEFAULT_PROTOCOL.to_string(), message.to_string());
            }
        },
        Some(other) => {
            return Err(SnsError::InvalidParameter(format!(
                "Invalid parameter: MessageStructure {}",
                other
            )));
        }
    }

    Ok(bodies)
}

/// 指定プロトコル向けの本文（なければ `default`）
pub fn body_for(bodies: &IndexMap<String, String>, protocol: Option<&str>) -> String {
    protocol
        .and_then(|p| bodies.get(p))
        .or_else(|| bodies.get(DEFAULT_PROTOCOL))
        .cloned()
        .unwrap_or_default()
}

/// 解決済みの発行先
struct ResolvedTarget {
    arn: String,
    kind: TargetKind,
    protocol: Option<String>,
    enabled: bool,
}

fn resolve_target(state: &BackendState, req: &PublishRequest) -> SnsResult<ResolvedTarget> {
    let (arn, expected) = match (&req.target_arn, &req.topic_arn) {
        (Some(target), None) => (target.as_str(), None),
        (None, Some(topic)) => (topic.as_str(), Some(ResourceKind::Topic)),
        (Some(_), Some(_)) => {
            return Err(SnsError::InvalidParameter(
                "Invalid parameter: Only one of TargetArn or TopicArn may be specified"
                    .to_string(),
            ))
        }
        (None, None) => return Err(SnsError::missing("TargetArn or TopicArn")),
    };

    let parsed: Arn = arn
        .parse()
        .map_err(|_| SnsError::not_found("Target", arn))?;

    match (&parsed.resource, expected) {
        (ArnResource::Endpoint { platform, .. }, None) => {
            let endpoint = state
                .endpoints
                .get(arn)
                .ok_or_else(|| SnsError::not_found(ResourceKind::Endpoint.label(), arn))?;
            Ok(ResolvedTarget {
                arn: endpoint.arn.clone(),
                kind: TargetKind::Endpoint,
                protocol: Some(platform.clone()),
                enabled: endpoint.is_enabled(),
            })
        }
        (ArnResource::Topic { .. }, _) => {
            let topic = state
                .topics
                .get(arn)
                .ok_or_else(|| SnsError::not_found(ResourceKind::Topic.label(), arn))?;
            Ok(ResolvedTarget {
                arn: topic.arn.clone(),
                kind: TargetKind::Topic,
                protocol: None,
                enabled: true,
            })
        }
        (resource, _) => Err(SnsError::InvalidParameter(format!(
            "Invalid parameter: {} is not a valid publish target ({})",
            arn,
            resource.kind()
        ))),
    }
}

impl SnsBackend {
    /// メッセージを発行
    ///
    /// 無効化された（`Enabled=false`）エンドポイントへの発行も受け付け、
    /// 未配信として記録する。
    pub async fn publish(&self, req: PublishRequest) -> SnsResult<PublishResponse> {
        if req.message.is_empty() {
            return Err(SnsError::InvalidParameter(
                "Invalid parameter: Empty message".to_string(),
            ));
        }
        if req.message.len() > MAX_MESSAGE_BYTES {
            return Err(SnsError::InvalidParameter(
                "Invalid parameter: Message too long".to_string(),
            ));
        }
        let bodies = split_bodies(&req.message, req.message_structure.as_deref())?;

        let mut state = self.state.write().await;
        let target = resolve_target(&state, &req)?;

        let message_id = Uuid::new_v4();
        let delivered_body = body_for(&bodies, target.protocol.as_deref());
        let message = PublishedMessage {
            message_id,
            target_arn: target.arn,
            target_kind: target.kind,
            subject: req.subject,
            message_structure: req.message_structure,
            bodies,
            delivered_body,
            delivered: target.enabled,
            published_at: Utc::now(),
        };

        if message.delivered {
            info!(%message_id, target_arn = %message.target_arn, "Message published");
        } else {
            debug!(%message_id, target_arn = %message.target_arn, "Endpoint disabled, message not delivered");
        }
        state.publish_log.record(message);

        Ok(PublishResponse { message_id })
    }
}
