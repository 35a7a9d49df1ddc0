//! エンドポイントレジストリ
//!
//! プラットフォームエンドポイントを親アプリケーションARNと紐付けて管理

use indexmap::IndexMap;
use sns_mock_common::{
    arn::ArnGenerator,
    attributes::Attributes,
    error::{SnsError, SnsResult},
    protocol::{
        AttributesResponse, CreateEndpointResponse, CreatePlatformEndpointRequest,
        EndpointSummary, ListEndpointsByPlatformApplicationResponse,
    },
    types::{PlatformApplication, PlatformEndpoint},
};
use tracing::{debug, info};
use uuid::Uuid;

use super::{check_delete_arn, check_lookup_arn, paginate, ResourceKind, SnsBackend};

/// 予約属性: ユーザーデータ
pub const CUSTOM_USER_DATA: &str = "CustomUserData";

/// 予約属性: 有効フラグ
pub const ENABLED: &str = "Enabled";

/// エンドポイントレジストリ（ARN→エンドポイント、作成順）
#[derive(Debug, Default)]
pub struct EndpointRegistry {
    endpoints: IndexMap<String, PlatformEndpoint>,
}

impl EndpointRegistry {
    /// エンドポイントを登録
    ///
    /// 同じアプリケーションに同じトークンが登録済みの場合は既存ARNを返す。
    /// ただし `CustomUserData` が異なる場合はエラー。
    pub fn create(
        &mut self,
        arns: &ArnGenerator,
        application: &PlatformApplication,
        req: CreatePlatformEndpointRequest,
    ) -> SnsResult<(String, bool)> {
        if req.token.is_empty() {
            return Err(SnsError::InvalidParameter(
                "Invalid parameter: Token Reason: cannot be empty".to_string(),
            ));
        }

        let mut attributes = req.attributes;
        if let Some(data) = req.custom_user_data {
            if !attributes.contains_key(CUSTOM_USER_DATA) {
                attributes.insert(CUSTOM_USER_DATA, data);
            }
        }

        if let Some(existing) = self.find_by_token(&application.arn, &req.token) {
            let requested = attributes.get(CUSTOM_USER_DATA);
            let stored = existing.attributes.get(CUSTOM_USER_DATA);
            if requested.is_some() && requested != stored {
                return Err(SnsError::InvalidParameter(format!(
                    "Invalid parameter: Token Reason: Endpoint {} already exists with the same Token, but different attributes.",
                    existing.arn
                )));
            }
            return Ok((existing.arn.clone(), false));
        }

        let arn = arns.endpoint(application.platform, &application.name, Uuid::new_v4());
        let endpoint = PlatformEndpoint {
            arn: arn.clone(),
            application_arn: application.arn.clone(),
            token: req.token,
            attributes,
        };
        self.endpoints.insert(arn.clone(), endpoint);
        Ok((arn, true))
    }

    /// トークンからエンドポイントを検索
    pub fn find_by_token(&self, application_arn: &str, token: &str) -> Option<&PlatformEndpoint> {
        self.endpoints
            .values()
            .find(|e| e.application_arn == application_arn && e.token == token)
    }

    /// エンドポイントを取得
    pub fn get(&self, arn: &str) -> Option<&PlatformEndpoint> {
        self.endpoints.get(arn)
    }

    /// エンドポイントを可変で取得
    pub fn get_mut(&mut self, arn: &str) -> Option<&mut PlatformEndpoint> {
        self.endpoints.get_mut(arn)
    }

    /// 指定アプリケーション配下のエンドポイント（作成順）
    pub fn list_by_application<'a>(
        &'a self,
        application_arn: &'a str,
    ) -> impl Iterator<Item = &'a PlatformEndpoint> + 'a {
        self.endpoints
            .values()
            .filter(move |e| e.application_arn == application_arn)
    }

    /// エンドポイントを削除
    pub fn remove(&mut self, arn: &str) -> Option<PlatformEndpoint> {
        self.endpoints.shift_remove(arn)
    }

    /// 指定アプリケーション配下を一括削除し、削除件数を返す
    pub fn remove_by_application(&mut self, application_arn: &str) -> usize {
        let before = self.endpoints.len();
        self.endpoints
            .retain(|_, e| e.application_arn != application_arn);
        before - self.endpoints.len()
    }
}

impl SnsBackend {
    /// アプリケーション配下にエンドポイントを作成
    pub async fn create_platform_endpoint(
        &self,
        req: CreatePlatformEndpointRequest,
    ) -> SnsResult<CreateEndpointResponse> {
        let application_arn = req.platform_application_arn.clone();
        check_lookup_arn(&application_arn, ResourceKind::Application)?;

        let mut state = self.state.write().await;
        let application = state
            .applications
            .get(&application_arn)
            .cloned()
            .ok_or_else(|| {
                SnsError::not_found(ResourceKind::Application.label(), &application_arn)
            })?;
        let (arn, created) = state
            .endpoints
            .create(self.arn_generator(), &application, req)?;

        if created {
            info!(arn = %arn, application_arn = %application_arn, "Platform endpoint created");
        } else {
            debug!(arn = %arn, "Platform endpoint already registered for token");
        }

        Ok(CreateEndpointResponse { endpoint_arn: arn })
    }

    /// アプリケーション配下のエンドポイント一覧（100件単位）
    pub async fn list_endpoints_by_platform_application(
        &self,
        application_arn: &str,
        next_token: Option<&str>,
    ) -> SnsResult<ListEndpointsByPlatformApplicationResponse> {
        check_lookup_arn(application_arn, ResourceKind::Application)?;
        let state = self.state.read().await;
        if state.applications.get(application_arn).is_none() {
            return Err(SnsError::not_found(
                ResourceKind::Application.label(),
                application_arn,
            ));
        }

        let summaries = state
            .endpoints
            .list_by_application(application_arn)
            .map(|endpoint| EndpointSummary {
                endpoint_arn: endpoint.arn.clone(),
                attributes: endpoint.attributes.clone(),
            })
            .collect();
        let (endpoints, next_token) = paginate(summaries, next_token)?;

        Ok(ListEndpointsByPlatformApplicationResponse {
            endpoints,
            next_token,
        })
    }

    /// エンドポイントを取得
    pub async fn get_endpoint(&self, arn: &str) -> SnsResult<PlatformEndpoint> {
        check_lookup_arn(arn, ResourceKind::Endpoint)?;
        let state = self.state.read().await;
        state
            .endpoints
            .get(arn)
            .cloned()
            .ok_or_else(|| SnsError::not_found(ResourceKind::Endpoint.label(), arn))
    }

    /// 属性を取得
    pub async fn get_endpoint_attributes(&self, arn: &str) -> SnsResult<AttributesResponse> {
        let endpoint = self.get_endpoint(arn).await?;
        Ok(AttributesResponse {
            attributes: endpoint.attributes,
        })
    }

    /// 属性を部分更新
    pub async fn set_endpoint_attributes(
        &self,
        arn: &str,
        attributes: &Attributes,
    ) -> SnsResult<()> {
        check_lookup_arn(arn, ResourceKind::Endpoint)?;
        let mut state = self.state.write().await;
        let endpoint = state
            .endpoints
            .get_mut(arn)
            .ok_or_else(|| SnsError::not_found(ResourceKind::Endpoint.label(), arn))?;
        endpoint.attributes.merge(attributes);

        debug!(arn, updated = attributes.len(), "Endpoint attributes set");
        Ok(())
    }

    /// エンドポイントを削除（存在しない場合も成功）
    pub async fn delete_endpoint(&self, arn: &str) -> SnsResult<()> {
        check_delete_arn(arn, ResourceKind::Endpoint)?;
        let mut state = self.state.write().await;
        if state.endpoints.remove(arn).is_some() {
            info!(arn, "Platform endpoint deleted");
        }
        Ok(())
    }
}
