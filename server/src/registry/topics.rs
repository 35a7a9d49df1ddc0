//! トピック登録管理

use indexmap::IndexMap;
use sns_mock_common::{
    arn::ArnGenerator,
    attributes::Attributes,
    error::{SnsError, SnsResult},
    protocol::{AttributesResponse, CreateTopicResponse, ListTopicsResponse, TopicSummary},
    types::Topic,
};
use tracing::info;

use super::{check_delete_arn, check_lookup_arn, paginate, ResourceKind, SnsBackend};

const MAX_NAME_LEN: usize = 256;

/// トピックレジストリ
#[derive(Debug, Default)]
pub struct TopicRegistry {
    topics: IndexMap<String, Topic>,
}

impl TopicRegistry {
    /// トピックを作成（同名は既存ARNを返す）
    pub fn create(&mut self, arns: &ArnGenerator, name: &str) -> SnsResult<(String, bool)> {
        let valid = !name.is_empty()
            && name.len() <= MAX_NAME_LEN
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
        if !valid {
            return Err(SnsError::InvalidParameter(format!(
                "Invalid parameter: Topic Name {}",
                name
            )));
        }

        let arn = arns.topic(name);
        if self.topics.contains_key(&arn) {
            return Ok((arn, false));
        }

        let attributes = Attributes::new()
            .with("TopicArn", arn.as_str())
            .with("DisplayName", "")
            .with("Owner", arns.account_id())
            .with("SubscriptionsConfirmed", 0u32)
            .with("SubscriptionsPending", 0u32)
            .with("SubscriptionsDeleted", 0u32);
        self.topics.insert(
            arn.clone(),
            Topic {
                arn: arn.clone(),
                name: name.to_string(),
                attributes,
            },
        );
        Ok((arn, true))
    }

    /// トピックを取得
    pub fn get(&self, arn: &str) -> Option<&Topic> {
        self.topics.get(arn)
    }

    /// 作成順に全件
    pub fn list(&self) -> impl Iterator<Item = &Topic> {
        self.topics.values()
    }

    /// トピックを削除
    pub fn remove(&mut self, arn: &str) -> Option<Topic> {
        self.topics.shift_remove(arn)
    }
}

impl SnsBackend {
    /// トピックを作成
    pub async fn create_topic(&self, name: &str) -> SnsResult<CreateTopicResponse> {
        let mut state = self.state.write().await;
        let (arn, created) = state.topics.create(self.arn_generator(), name)?;
        if created {
            info!(arn = %arn, "Topic created");
        }
        Ok(CreateTopicResponse { topic_arn: arn })
    }

    /// トピック一覧（100件単位）
    pub async fn list_topics(&self, next_token: Option<&str>) -> SnsResult<ListTopicsResponse> {
        let state = self.state.read().await;
        let summaries = state
            .topics
            .list()
            .map(|topic| TopicSummary {
                topic_arn: topic.arn.clone(),
            })
            .collect();
        let (topics, next_token) = paginate(summaries, next_token)?;
        Ok(ListTopicsResponse { topics, next_token })
    }

    /// トピック属性を取得
    pub async fn get_topic_attributes(&self, arn: &str) -> SnsResult<AttributesResponse> {
        check_lookup_arn(arn, ResourceKind::Topic)?;
        let state = self.state.read().await;
        let topic = state
            .topics
            .get(arn)
            .ok_or_else(|| SnsError::not_found(ResourceKind::Topic.label(), arn))?;
        Ok(AttributesResponse {
            attributes: topic.attributes.clone(),
        })
    }

    /// トピックを削除（存在しない場合も成功）
    pub async fn delete_topic(&self, arn: &str) -> SnsResult<()> {
        check_delete_arn(arn, ResourceKind::Topic)?;
        let mut state = self.state.write().await;
        if state.topics.remove(arn).is_some() {
            info!(arn, "Topic deleted");
        }
        Ok(())
    }
}
