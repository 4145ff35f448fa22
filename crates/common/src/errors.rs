//! 错误类型定义

use std::fmt;
use thiserror::Error;

/// 查找失败时的条目类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// 注册表中的服务
    Service,
    /// 参数存储中的参数
    Parameter,
    /// 中间件栈
    Stack,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Service => "service",
            Self::Parameter => "parameter",
            Self::Stack => "stack",
        };
        f.write_str(name)
    }
}

/// 内核原语错误类型
#[derive(Error, Debug)]
pub enum KernelError {
    #[error("参数错误: {message}")]
    Argument { message: String },

    #[error("{kind} 未定义: {key}")]
    NotFound { kind: EntryKind, key: String },

    #[error("类型不匹配: {key}, 期望类型: {expected}")]
    TypeMismatch { key: String, expected: String },

    #[error("中间件处理失败: {stack}, 原因: {message}")]
    Handler { stack: String, message: String },
}

impl KernelError {
    /// 创建参数错误
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument {
            message: message.into(),
        }
    }

    /// 创建未找到错误
    pub fn not_found(kind: EntryKind, key: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            key: key.into(),
        }
    }

    /// 创建类型不匹配错误
    pub fn type_mismatch(key: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::TypeMismatch {
            key: key.into(),
            expected: expected.into(),
        }
    }

    /// 创建中间件处理错误
    pub fn handler(stack: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Handler {
            stack: stack.into(),
            message: message.into(),
        }
    }

    /// 是否为参数错误
    pub fn is_argument(&self) -> bool {
        matches!(self, Self::Argument { .. })
    }

    /// 是否为未找到错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("不支持的配置格式: {path}")]
    UnsupportedFormat { path: String },

    #[error("配置值无效: {key}, 原因: {message}")]
    InvalidValue { key: String, message: String },
}

/// 组合层错误类型
#[derive(Error, Debug)]
pub enum CompositionError {
    #[error("内核错误: {source}")]
    Kernel {
        #[from]
        source: KernelError,
    },

    #[error("配置错误: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("内核启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type KernelResult<T> = Result<T, KernelError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type CompositionResult<T> = Result<T, CompositionError>;

/// 拒绝空标识符
pub fn require_key(what: &str, key: &str) -> KernelResult<()> {
    if key.is_empty() {
        return Err(KernelError::argument(format!("{what} 不能为空")));
    }
    Ok(())
}
