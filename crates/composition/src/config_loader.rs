//! 配置文件加载
//!
//! 按扩展名选择解析器：`.toml` 使用 `toml`，`.json` 使用 `serde_json`。

use nano_common::{ConfigError, ConfigResult, KernelConfig};
use std::path::Path;
use tracing::info;

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// 根据文件扩展名判断格式
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }

    /// 解析配置文本
    pub fn parse(self, content: &str) -> ConfigResult<KernelConfig> {
        match self {
            Self::Toml => toml::from_str(content).map_err(|e| ConfigError::ParseError {
                source: Box::new(e),
            }),
            Self::Json => serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
                source: Box::new(e),
            }),
        }
    }
}

/// 读取并校验配置文件
pub fn load_config_file<P: AsRef<Path>>(path: P) -> ConfigResult<KernelConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    let config = format.parse(&content)?;
    config.validate()?;

    info!(
        "加载配置文件: {} ({} 个参数, {} 个栈)",
        path.display(),
        config.parameters.len(),
        config.middleware.stacks.len()
    );
    Ok(config)
}
