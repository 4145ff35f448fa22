//! 服务生命周期

use std::fmt;

/// 瞬时服务标识符的前缀
pub const TRANSIENT_PREFIX: char = '_';

/// 服务生命周期类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// 单例模式 - 工厂最多调用一次，结果被缓存
    Singleton,
    /// 瞬时模式 - 每次查找都调用工厂
    Transient,
}

impl Lifetime {
    /// 根据标识符的拼写确定生命周期
    ///
    /// 以 `_` 开头的标识符为瞬时服务，其余为单例。
    pub fn from_identifier(id: &str) -> Self {
        if id.starts_with(TRANSIENT_PREFIX) {
            Self::Transient
        } else {
            Self::Singleton
        }
    }

    /// 是否为单例
    pub fn is_singleton(self) -> bool {
        matches!(self, Self::Singleton)
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::Singleton
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singleton => f.write_str("singleton"),
            Self::Transient => f.write_str("transient"),
        }
    }
}
