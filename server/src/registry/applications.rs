//! プラットフォームアプリケーション登録管理

use indexmap::IndexMap;
use sns_mock_common::{
    arn::ArnGenerator,
    attributes::Attributes,
    error::{SnsError, SnsResult},
    protocol::{
        AttributesResponse, CreatePlatformApplicationRequest, CreatePlatformApplicationResponse,
        ListPlatformApplicationsResponse, PlatformApplicationSummary,
    },
    types::PlatformApplication,
};
use tracing::{debug, info};

use super::{check_delete_arn, check_lookup_arn, paginate, ResourceKind, SnsBackend};

const MAX_NAME_LEN: usize = 256;

/// アプリケーションレジストリ（ARN→アプリケーション、作成順）
#[derive(Debug, Default)]
pub struct ApplicationRegistry {
    applications: IndexMap<String, PlatformApplication>,
}

impl ApplicationRegistry {
    /// アプリケーションを登録
    ///
    /// 同名・同プラットフォームが既に存在する場合は既存エントリに属性をマージし、
    /// `false` を返す。
    pub fn create(
        &mut self,
        arns: &ArnGenerator,
        req: CreatePlatformApplicationRequest,
    ) -> SnsResult<(String, bool)> {
        validate_name(&req.name)?;
        let arn = arns.application(req.platform, &req.name);

        if let Some(existing) = self.applications.get_mut(&arn) {
            existing.attributes.merge(&req.attributes);
            return Ok((arn, false));
        }

        let application = PlatformApplication {
            arn: arn.clone(),
            name: req.name,
            platform: req.platform,
            attributes: req.attributes,
        };
        self.applications.insert(arn.clone(), application);
        Ok((arn, true))
    }

    /// アプリケーションを取得
    pub fn get(&self, arn: &str) -> Option<&PlatformApplication> {
        self.applications.get(arn)
    }

    /// アプリケーションを可変で取得
    pub fn get_mut(&mut self, arn: &str) -> Option<&mut PlatformApplication> {
        self.applications.get_mut(arn)
    }

    /// 作成順に全件
    pub fn list(&self) -> impl Iterator<Item = &PlatformApplication> {
        self.applications.values()
    }

    /// アプリケーションを削除（順序は維持）
    pub fn remove(&mut self, arn: &str) -> Option<PlatformApplication> {
        self.applications.shift_remove(arn)
    }

    /// 登録数
    pub fn len(&self) -> usize {
        self.applications.len()
    }
}

fn validate_name(name: &str) -> SnsResult<()> {
    let valid = !name.is_empty()
        && name.len() <= MAX_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(SnsError::InvalidParameter(format!(
            "Invalid parameter: Name {}",
            name
        )))
    }
}

impl SnsBackend {
    /// プラットフォームアプリケーションを作成
    pub async fn create_platform_application(
        &self,
        req: CreatePlatformApplicationRequest,
    ) -> SnsResult<CreatePlatformApplicationResponse> {
        let platform = req.platform;
        let mut state = self.state.write().await;
        let (arn, created) = state.applications.create(self.arn_generator(), req)?;

        if created {
            info!(arn = %arn, %platform, "Platform application created");
        } else {
            info!(arn = %arn, "Platform application already exists, attributes merged");
        }

        Ok(CreatePlatformApplicationResponse {
            platform_application_arn: arn,
        })
    }

    /// プラットフォームアプリケーションを取得
    pub async fn get_platform_application(&self, arn: &str) -> SnsResult<PlatformApplication> {
        check_lookup_arn(arn, ResourceKind::Application)?;
        let state = self.state.read().await;
        state
            .applications
            .get(arn)
            .cloned()
            .ok_or_else(|| SnsError::not_found(ResourceKind::Application.label(), arn))
    }

    /// 属性を取得
    pub async fn get_platform_application_attributes(
        &self,
        arn: &str,
    ) -> SnsResult<AttributesResponse> {
        let application = self.get_platform_application(arn).await?;
        Ok(AttributesResponse {
            attributes: application.attributes,
        })
    }

    /// 属性を部分更新
    pub async fn set_platform_application_attributes(
        &self,
        arn: &str,
        attributes: &Attributes,
    ) -> SnsResult<()> {
        check_lookup_arn(arn, ResourceKind::Application)?;
        let mut state = self.state.write().await;
        let application = state
            .applications
            .get_mut(arn)
            .ok_or_else(|| SnsError::not_found(ResourceKind::Application.label(), arn))?;
        application.attributes.merge(attributes);

        debug!(arn, updated = attributes.len(), "Platform application attributes set");
        Ok(())
    }

    /// アプリケーション一覧（100件単位）
    pub async fn list_platform_applications(
        &self,
        next_token: Option<&str>,
    ) -> SnsResult<ListPlatformApplicationsResponse> {
        let state = self.state.read().await;
        let summaries = state
            .applications
            .list()
            .map(|application| PlatformApplicationSummary {
                platform_application_arn: application.arn.clone(),
                attributes: application.attributes.clone(),
            })
            .collect();
        let (platform_applications, next_token) = paginate(summaries, next_token)?;

        Ok(ListPlatformApplicationsResponse {
            platform_applications,
            next_token,
        })
    }

    /// アプリケーションを削除し、配下のエンドポイントも削除する
    ///
    /// 存在しないARNの削除は成功として扱う。
    pub async fn delete_platform_application(&self, arn: &str) -> SnsResult<()> {
        check_delete_arn(arn, ResourceKind::Application)?;
        let mut state = self.state.write().await;

        if state.applications.remove(arn).is_none() {
            debug!(arn, "Delete of unknown platform application ignored");
            return Ok(());
        }
        let removed_endpoints = state.endpoints.remove_by_application(arn);

        info!(arn, removed_endpoints, "Platform application deleted");
        Ok(())
    }
}
