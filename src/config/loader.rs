//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    ManagerSettings,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".locale-pathname.json";

/// ディレクトリから設定を読み込む
///
/// `.locale-pathname.json` ファイルを探して読み込む。
/// ロケールデータは読み込まない（設定のみ）。
///
/// # Arguments
/// * `dir` - 設定ファイルを探すディレクトリ
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みとバリデーションに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込み、パース、またはバリデーションエラー
pub fn load_from_dir(dir: &Path) -> Result<Option<ManagerSettings>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    load_from_str(&content).map(Some)
}

/// JSON 文字列から設定を読み込み、バリデーションする
pub fn load_from_str(content: &str) -> Result<ManagerSettings, ConfigError> {
    let settings: ManagerSettings = serde_json::from_str(content)?;
    settings.validate().map_err(ConfigError::ValidationErrors)?;
    Ok(settings)
}
