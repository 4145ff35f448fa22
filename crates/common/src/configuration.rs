//! 内核配置定义

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 内核配置
///
/// 所有字段都有默认值，空文件即为合法配置。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// 日志配置
    pub logging: LoggingConfig,
    /// 预置到参数存储的参数
    pub parameters: BTreeMap<String, serde_json::Value>,
    /// 中间件配置
    pub middleware: MiddlewareSection,
}

impl KernelConfig {
    /// 校验配置
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(key) = self.parameters.keys().find(|key| key.is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: format!("parameters.{key}"),
                message: "参数键不能为空".to_string(),
            });
        }

        if self.middleware.stacks.iter().any(|stack| stack.is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: "middleware.stacks".to_string(),
                message: "栈标识不能为空".to_string(),
            });
        }

        Ok(())
    }
}

/// 中间件配置节
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiddlewareSection {
    /// 预先声明的空栈
    pub stacks: Vec<String>,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// 转换为 tracing 级别
    pub fn as_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 是否初始化日志系统
    pub enabled: bool,
    /// 日志级别
    pub level: LogLevel,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: LogLevel::Info,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Debug,
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Info,
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }
}
