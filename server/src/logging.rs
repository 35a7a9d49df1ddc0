//! ロギング初期化ユーティリティ
//!
//! `SNS_MOCK_LOG_LEVEL` でフィルタ（既定 `info`）、
//! `SNS_MOCK_LOG_DIR` 指定時は日次ローテーションのファイルにも出力する。

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// ログレベル指定の環境変数
pub const LOG_LEVEL_ENV: &str = "SNS_MOCK_LOG_LEVEL";
/// ログ出力先ディレクトリの環境変数
pub const LOG_DIR_ENV: &str = "SNS_MOCK_LOG_DIR";

const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_FILE_PREFIX: &str = "sns-mock.log";

/// フィルタ文字列から `EnvFilter` を作成
pub fn build_filter(level: Option<&str>) -> anyhow::Result<EnvFilter> {
    let level = level
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_LOG_LEVEL);
    EnvFilter::try_new(level).with_context(|| format!("invalid {}: {}", LOG_LEVEL_ENV, level))
}

/// グローバルsubscriberを初期化
///
/// ファイル出力が有効な場合は返されたガードを保持し続けること
/// （ドロップ時に未書き込みのログがフラッシュされる）。
pub fn init() -> anyhow::Result<Option<WorkerGuard>> {
    let level = std::env::var(LOG_LEVEL_ENV).ok();
    let filter = build_filter(level.as_deref())?;

    let (file_layer, guard) = match std::env::var(LOG_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => {
            let appender = tracing_appender::rolling::daily(dir.trim(), LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}
