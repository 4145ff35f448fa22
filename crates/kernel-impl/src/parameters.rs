//! 参数存储实现

use dashmap::DashMap;
use nano_abstractions::{ParameterStore, PARAMETER_OPERATIONS};
use nano_common::{require_key, EntryKind, KernelError, KernelResult, OperationKind, Value};
use tracing::debug;

/// 参数存储实现
#[derive(Debug, Default)]
pub struct ParameterStoreImpl {
    values: DashMap<String, Value>,
}

impl ParameterStoreImpl {
    /// 创建新的参数存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 校验字符串操作码
    pub fn check_operation(name: &str) -> KernelResult<OperationKind> {
        OperationKind::parse_supported(name, PARAMETER_OPERATIONS)
    }
}

impl ParameterStore for ParameterStoreImpl {
    fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn set(&self, key: &str, value: Value) -> KernelResult<()> {
        require_key("参数键", key)?;
        debug!("写入参数: {}", key);
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) {
        if self.values.remove(key).is_some() {
            debug!("删除参数: {}", key);
        }
    }

    fn get_or_default(&self, key: &str, default: Value) -> Value {
        self.values
            .get(key)
            .map(|entry| entry.value().clone())
            .unwrap_or(default)
    }

    fn get(&self, key: &str) -> KernelResult<Value> {
        self.values
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| KernelError::not_found(EntryKind::Parameter, key))
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.iter().map(|entry| entry.key().clone()).collect();
        keys.sort();
        keys
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}
