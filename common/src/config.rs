//! 設定管理
//!
//! MockConfig 設定構造体と、設定ファイル・環境変数からの読み込み

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::arn::ArnGenerator;
use crate::error::CommonError;

/// 環境変数のプレフィックス（`SNS_MOCK_PORT` 等）
pub const ENV_PREFIX: &str = "SNS_MOCK";

/// モックサービス設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MockConfig {
    /// ホストアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 4575)
    #[serde(default = "default_port")]
    pub port: u16,

    /// リージョン (デフォルト: "us-east-1")
    #[serde(default = "default_region")]
    pub region: String,

    /// アカウントID (デフォルト: "123456789012")
    #[serde(default = "default_account_id")]
    pub account_id: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4575
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_account_id() -> String {
    "123456789012".to_string()
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            region: default_region(),
            account_id: default_account_id(),
        }
    }
}

impl MockConfig {
    /// 設定ファイル（任意）と `SNS_MOCK_*` 環境変数から読み込む
    ///
    /// 環境変数はファイルの値より優先される。
    pub fn load(path: Option<&Path>) -> Result<Self, CommonError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }
        builder = builder.add_source(::config::Environment::with_prefix(ENV_PREFIX));

        let config = builder
            .build()
            .map_err(|e| CommonError::Config(e.to_string()))?;
        let loaded: MockConfig = config
            .try_deserialize()
            .map_err(|e| CommonError::Config(e.to_string()))?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// 値の妥当性を検証
    pub fn validate(&self) -> Result<(), CommonError> {
        if self.region.trim().is_empty() {
            return Err(CommonError::Config("region must not be empty".to_string()));
        }
        if self.account_id.is_empty() || !self.account_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(CommonError::Config(format!(
                "account_id must be numeric: {}",
                self.account_id
            )));
        }
        Ok(())
    }

    /// バインドアドレス
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// この設定に対応するARN生成器
    pub fn arn_generator(&self) -> ArnGenerator {
        ArnGenerator::new(self.region.clone(), self.account_id.clone())
    }
}
