//! ARN生成・解析
//!
//! `arn:<partition>:sns:<region>:<account-id>:<resource>` 形式の
//! 識別子を組み立て、受け取ったARNを種別ごとに分類する

use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CommonError;
use crate::types::Platform;

/// ARNのサービス名
pub const SERVICE: &str = "sns";

/// リージョン名からパーティションを決定
pub fn partition_for_region(region: &str) -> &'static str {
    if region.starts_with("cn-") {
        "aws-cn"
    } else if region.starts_with("us-gov-") {
        "aws-us-gov"
    } else {
        "aws"
    }
}

/// アカウント・リージョンに束縛されたARN生成器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArnGenerator {
    partition: String,
    region: String,
    account_id: String,
}

impl ArnGenerator {
    /// 新しい生成器を作成（パーティションはリージョンから導出）
    pub fn new(region: impl Into<String>, account_id: impl Into<String>) -> Self {
        let region = region.into();
        Self {
            partition: partition_for_region(&region).to_string(),
            region,
            account_id: account_id.into(),
        }
    }

    /// リージョン
    pub fn region(&self) -> &str {
        &self.region
    }

    /// アカウントID
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    fn prefix(&self) -> String {
        format!(
            "arn:{}:{}:{}:{}",
            self.partition, SERVICE, self.region, self.account_id
        )
    }

    /// プラットフォームアプリケーションのARN
    pub fn application(&self, platform: Platform, name: &str) -> String {
        format!("{}:app/{}/{}", self.prefix(), platform, name)
    }

    /// プラットフォームエンドポイントのARN
    pub fn endpoint(&self, platform: Platform, application_name: &str, id: Uuid) -> String {
        format!(
            "{}:endpoint/{}/{}/{}",
            self.prefix(),
            platform,
            application_name,
            id
        )
    }

    /// トピックのARN
    pub fn topic(&self, name: &str) -> String {
        format!("{}:{}", self.prefix(), name)
    }
}

/// ARNのリソース部分の種別
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArnResource {
    /// `app/<platform>/<name>`
    Application {
        /// プラットフォーム名
        platform: String,
        /// アプリケーション名
        name: String,
    },
    /// `endpoint/<platform>/<application>/<id>`
    Endpoint {
        /// プラットフォーム名
        platform: String,
        /// 親アプリケーション名
        application: String,
        /// エンドポイントID
        id: String,
    },
    /// `<topic-name>`
    Topic {
        /// トピック名
        name: String,
    },
    /// 上記以外
    Other(String),
}

impl ArnResource {
    /// 人間向けの種別名
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Application { .. } => "PlatformApplication",
            Self::Endpoint { .. } => "Endpoint",
            Self::Topic { .. } => "Topic",
            Self::Other(_) => "resource",
        }
    }

    fn parse(resource: &str) -> Self {
        let parts: Vec<&str> = resource.split('/').collect();
        match parts.as_slice() {
            ["app", platform, name] if !platform.is_empty() && !name.is_empty() => {
                Self::Application {
                    platform: platform.to_string(),
                    name: name.to_string(),
                }
            }
            ["endpoint", platform, application, id]
                if !platform.is_empty() && !application.is_empty() && !id.is_empty() =>
            {
                Self::Endpoint {
                    platform: platform.to_string(),
                    application: application.to_string(),
                    id: id.to_string(),
                }
            }
            [name] if !name.is_empty() => Self::Topic {
                name: name.to_string(),
            },
            _ => Self::Other(resource.to_string()),
        }
    }
}

/// 解析済みARN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn {
    /// パーティション（`aws` 等）
    pub partition: String,
    /// サービス名
    pub service: String,
    /// リージョン
    pub region: String,
    /// アカウントID
    pub account_id: String,
    /// リソース種別
    pub resource: ArnResource,
    raw_resource: String,
}

impl Arn {
    /// SNSのARNか
    pub fn is_sns(&self) -> bool {
        self.service == SERVICE
    }
}

impl FromStr for Arn {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(6, ':').collect();
        let [scheme, partition, service, region, account_id, resource] = parts.as_slice() else {
            return Err(CommonError::InvalidArn(s.to_string()));
        };
        if *scheme != "arn"
            || partition.is_empty()
            || service.is_empty()
            || region.is_empty()
            || account_id.is_empty()
            || resource.is_empty()
        {
            return Err(CommonError::InvalidArn(s.to_string()));
        }

        Ok(Self {
            partition: partition.to_string(),
            service: service.to_string(),
            region: region.to_string(),
            account_id: account_id.to_string(),
            resource: ArnResource::parse(resource),
            raw_resource: resource.to_string(),
        })
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account_id, self.raw_resource
        )
    }
}
