//! 参数存储抽象接口

use nano_common::{KernelError, KernelResult, OperationKind, Value};
use serde::de::DeserializeOwned;

/// 参数存储支持的操作
pub const PARAMETER_OPERATIONS: &[OperationKind] = &[
    OperationKind::Has,
    OperationKind::Set,
    OperationKind::Delete,
    OperationKind::GetOrDefault,
    OperationKind::Get,
];

/// 参数存储操作
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterOp {
    Has,
    Set(Value),
    Delete,
    GetOrDefault(Value),
    Get,
}

impl ParameterOp {
    /// 操作种类
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Has => OperationKind::Has,
            Self::Set(_) => OperationKind::Set,
            Self::Delete => OperationKind::Delete,
            Self::GetOrDefault(_) => OperationKind::GetOrDefault,
            Self::Get => OperationKind::Get,
        }
    }
}

/// 参数存储操作结果
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterReply {
    Exists(bool),
    Stored,
    Deleted,
    Value(Value),
}

/// 参数存储 trait
///
/// 存储的 `Value::Null` 与不存在是两回事，用 [`ParameterStore::has`] 区分。
pub trait ParameterStore: Send + Sync {
    /// 检查参数是否存在
    fn has(&self, key: &str) -> bool;

    /// 写入参数，无条件覆盖
    fn set(&self, key: &str, value: Value) -> KernelResult<()>;

    /// 删除参数，不存在时什么也不做
    fn delete(&self, key: &str);

    /// 读取参数，不存在时返回默认值
    fn get_or_default(&self, key: &str, default: Value) -> Value;

    /// 读取参数
    fn get(&self, key: &str) -> KernelResult<Value>;

    /// 所有参数键（已排序）
    fn keys(&self) -> Vec<String>;

    /// 参数数量
    fn len(&self) -> usize;

    /// 是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 按具体类型读取参数
    fn get_as<T>(&self, key: &str) -> KernelResult<T>
    where
        Self: Sized,
        T: DeserializeOwned,
    {
        let value = self.get(key)?;
        serde_json::from_value(value)
            .map_err(|_| KernelError::type_mismatch(key, std::any::type_name::<T>()))
    }

    /// 批量写入
    fn extend<I>(&self, entries: I) -> KernelResult<()>
    where
        Self: Sized,
        I: IntoIterator<Item = (String, Value)>,
    {
        for (key, value) in entries {
            self.set(&key, value)?;
        }
        Ok(())
    }

    /// 以操作枚举寻址
    fn dispatch(&self, key: &str, op: ParameterOp) -> KernelResult<ParameterReply> {
        match op {
            ParameterOp::Has => Ok(ParameterReply::Exists(self.has(key))),
            ParameterOp::Set(value) => {
                self.set(key, value)?;
                Ok(ParameterReply::Stored)
            }
            ParameterOp::Delete => {
                self.delete(key);
                Ok(ParameterReply::Deleted)
            }
            ParameterOp::GetOrDefault(default) => {
                Ok(ParameterReply::Value(self.get_or_default(key, default)))
            }
            ParameterOp::Get => self.get(key).map(ParameterReply::Value),
        }
    }
}
