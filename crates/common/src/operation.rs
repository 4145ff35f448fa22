//! 操作码定义
//!
//! 原语的主接口是带类型负载的操作枚举；这里的 [`OperationKind`]
//! 只用于按名称路由调用的宿主，把字符串操作码解析为枚举。

use crate::errors::{KernelError, KernelResult};
use std::fmt;
use std::str::FromStr;

/// 操作种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// 存在性检查
    Has,
    /// 写入
    Set,
    /// 读取
    Get,
    /// 删除
    Delete,
    /// 读取，不存在时返回默认值
    GetOrDefault,
    /// 注册监听器
    On,
    /// 触发事件
    Emit,
}

impl OperationKind {
    /// 规范名称
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Has => "has",
            Self::Set => "set",
            Self::Get => "get",
            Self::Delete => "delete",
            Self::GetOrDefault => "get_or_default",
            Self::On => "on",
            Self::Emit => "emit",
        }
    }

    /// 在给定的支持列表中解析操作码
    pub fn parse_supported(name: &str, supported: &[OperationKind]) -> KernelResult<Self> {
        let kind: Self = name.parse()?;
        if supported.contains(&kind) {
            Ok(kind)
        } else {
            Err(KernelError::argument(format!("操作未定义: {name}")))
        }
    }
}

impl FromStr for OperationKind {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "?" | "has" => Ok(Self::Has),
            "=" | "set" => Ok(Self::Set),
            "get" => Ok(Self::Get),
            "-" | "delete" => Ok(Self::Delete),
            "get_or_default" | "getOrDefault" => Ok(Self::GetOrDefault),
            "on" => Ok(Self::On),
            "emit" => Ok(Self::Emit),
            other => Err(KernelError::argument(format!("操作未定义: {other}"))),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
