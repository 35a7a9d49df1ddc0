//! リソース登録管理
//!
//! アプリケーション・エンドポイント・トピック・発行ログを
//! 1つのロックの下でメモリ内管理する

pub mod applications;
pub mod endpoints;
pub mod topics;

use std::sync::Arc;

use sns_mock_common::{
    arn::{Arn, ArnGenerator, ArnResource},
    config::MockConfig,
    error::{SnsError, SnsResult},
    types::PublishedMessage,
};
use tokio::sync::RwLock;
use tracing::info;

use crate::publish::PublishLog;
use applications::ApplicationRegistry;
use endpoints::EndpointRegistry;
use topics::TopicRegistry;

/// 一覧APIの1ページあたりの件数
pub const PAGE_SIZE: usize = 100;

/// ロックで保護される全状態
#[derive(Debug, Default)]
pub(crate) struct BackendState {
    pub(crate) applications: ApplicationRegistry,
    pub(crate) endpoints: EndpointRegistry,
    pub(crate) topics: TopicRegistry,
    pub(crate) publish_log: PublishLog,
}

/// モックSNSバックエンド
///
/// 1セッション分の状態を保持するコンテキスト。クローンは同じ状態を共有する。
/// 各操作は単一のロック区間で完結するため、途中状態は観測されない。
#[derive(Clone)]
pub struct SnsBackend {
    arns: ArnGenerator,
    pub(crate) state: Arc<RwLock<BackendState>>,
}

impl SnsBackend {
    /// 設定からバックエンドを作成
    pub fn new(config: &MockConfig) -> Self {
        Self::with_arn_generator(config.arn_generator())
    }

    /// ARN生成器を指定してバックエンドを作成
    pub fn with_arn_generator(arns: ArnGenerator) -> Self {
        Self {
            arns,
            state: Arc::new(RwLock::new(BackendState::default())),
        }
    }

    /// ARN生成器
    pub fn arn_generator(&self) -> &ArnGenerator {
        &self.arns
    }

    /// 全状態を破棄（セッションのリセット）
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        *state = BackendState::default();
        info!(
            region = self.arns.region(),
            account_id = self.arns.account_id(),
            "Backend state reset"
        );
    }

    /// 発行済みメッセージ全件
    pub async fn published_messages(&self) -> Vec<PublishedMessage> {
        self.state.read().await.publish_log.all().to_vec()
    }

    /// 指定ARN宛に発行されたメッセージ
    pub async fn published_messages_for(&self, arn: &str) -> Vec<PublishedMessage> {
        self.state.read().await.publish_log.for_target(arn)
    }
}

impl Default for SnsBackend {
    fn default() -> Self {
        Self::new(&MockConfig::default())
    }
}

/// ARNが指す資源の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResourceKind {
    Application,
    Endpoint,
    Topic,
}

impl ResourceKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Application => "PlatformApplication",
            Self::Endpoint => "Endpoint",
            Self::Topic => "Topic",
        }
    }

    fn matches(self, resource: &ArnResource) -> bool {
        matches!(
            (self, resource),
            (Self::Application, ArnResource::Application { .. })
                | (Self::Endpoint, ArnResource::Endpoint { .. })
                | (Self::Topic, ArnResource::Topic { .. })
        )
    }
}

/// 参照系操作のARN検査
///
/// ARNとして解釈できない文字列は `NotFound`、別種別のARNは `InvalidParameter`。
pub(crate) fn check_lookup_arn(arn: &str, kind: ResourceKind) -> SnsResult<Arn> {
    let parsed: Arn = arn
        .parse()
        .map_err(|_| SnsError::not_found(kind.label(), arn))?;
    if !parsed.is_sns() || !kind.matches(&parsed.resource) {
        return Err(wrong_kind(arn, kind));
    }
    Ok(parsed)
}

/// 削除系操作のARN検査（存在しないARNは成功扱いのため形式だけを見る）
pub(crate) fn check_delete_arn(arn: &str, kind: ResourceKind) -> SnsResult<Arn> {
    let parsed: Arn = arn.parse().map_err(|_| wrong_kind(arn, kind))?;
    if !parsed.is_sns() || !kind.matches(&parsed.resource) {
        return Err(wrong_kind(arn, kind));
    }
    Ok(parsed)
}

fn wrong_kind(arn: &str, kind: ResourceKind) -> SnsError {
    SnsError::InvalidParameter(format!(
        "Invalid parameter: {} Reason: {} is not a valid {} ARN",
        kind.label(),
        arn,
        kind.label()
    ))
}

/// `NextToken` に従って1ページ分を切り出す
///
/// トークンは次ページ先頭の位置（10進数）。
pub(crate) fn paginate<T>(items: Vec<T>, next_token: Option<&str>) -> SnsResult<(Vec<T>, Option<String>)> {
    let start = match next_token {
        None => 0,
        Some(token) => token
            .parse::<usize>()
            .ok()
            .filter(|offset| *offset <= items.len())
            .ok_or_else(|| {
                SnsError::InvalidParameter(format!("Invalid parameter: NextToken {}", token))
            })?,
    };

    let end = (start + PAGE_SIZE).min(items.len());
    let next = (end < items.len()).then(|| end.to_string());
    let page = items.into_iter().skip(start).take(end - start).collect();
    Ok((page, next))
}
