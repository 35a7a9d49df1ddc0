//! CLI module for sns-mock
//!
//! コマンドライン引数と設定ファイル・環境変数の統合

use std::path::PathBuf;

use clap::Parser;
use sns_mock_common::{config::MockConfig, error::CommonError};

/// SNS mock - In-memory mock of the SNS platform application API
#[derive(Parser, Debug)]
#[command(name = "sns-mock")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    SNS_MOCK_CONFIG         Config file path (toml/yaml/json)
    SNS_MOCK_HOST           Bind address (default: 0.0.0.0)
    SNS_MOCK_PORT           Listen port (default: 4575)
    SNS_MOCK_REGION         Region used in ARNs (default: us-east-1)
    SNS_MOCK_ACCOUNT_ID     Account id used in ARNs (default: 123456789012)
    SNS_MOCK_LOG_LEVEL      Log level (default: info)
    SNS_MOCK_LOG_DIR        Write daily rolling log files to this directory
"#)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "SNS_MOCK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Bind address
    #[arg(short = 'H', long, env = "SNS_MOCK_HOST")]
    pub host: Option<String>,

    /// Listen port
    #[arg(short, long, env = "SNS_MOCK_PORT")]
    pub port: Option<u16>,

    /// Region used in generated ARNs
    #[arg(long, env = "SNS_MOCK_REGION")]
    pub region: Option<String>,

    /// Account id used in generated ARNs
    #[arg(long, env = "SNS_MOCK_ACCOUNT_ID")]
    pub account_id: Option<String>,
}

impl Cli {
    /// 設定ファイル・環境変数を読み込み、コマンドライン引数で上書きする
    pub fn resolve_config(&self) -> Result<MockConfig, CommonError> {
        let mut config = MockConfig::load(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut MockConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(region) = &self.region {
            config.region = region.clone();
        }
        if let Some(account_id) = &self.account_id {
            config.account_id = account_id.clone();
        }
    }
}
