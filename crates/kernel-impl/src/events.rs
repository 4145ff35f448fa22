//! 事件分发器实现

use nano_abstractions::{EventDispatcher, Listener, EVENT_OPERATIONS};
use nano_common::{require_key, KernelResult, OperationKind, Value};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, info};

/// 已注册的监听器
#[derive(Clone)]
struct ListenerEntry {
    name: String,
    listener: Listener,
}

impl std::fmt::Debug for ListenerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerEntry")
            .field("name", &self.name)
            .field("listener", &"<function>")
            .finish()
    }
}

/// 事件分发器实现
///
/// 触发事件时先复制监听器序列再释放锁，监听器内部可以注册新的监听器
/// 或触发其它事件；新注册的监听器从下一次触发开始生效。
#[derive(Debug, Default)]
pub struct EventDispatcherImpl {
    listeners: RwLock<HashMap<String, Vec<ListenerEntry>>>,
}

impl EventDispatcherImpl {
    /// 创建新的事件分发器
    pub fn new() -> Self {
        Self::default()
    }

    /// 校验字符串操作码
    pub fn check_operation(name: &str) -> KernelResult<OperationKind> {
        OperationKind::parse_supported(name, EVENT_OPERATIONS)
    }
}

impl EventDispatcher for EventDispatcherImpl {
    fn add_listener(&self, event: &str, name: &str, listener: Listener) -> KernelResult<()> {
        require_key("事件名称", event)?;
        require_key("监听器名称", name)?;

        info!("注册事件监听器: {} -> {}", event, name);
        self.listeners
            .write()
            .entry(event.to_string())
            .or_default()
            .push(ListenerEntry {
                name: name.to_string(),
                listener,
            });
        Ok(())
    }

    fn emit(&self, event: &str, payload: &[Value]) {
        let snapshot = match self.listeners.read().get(event) {
            Some(entries) => entries.clone(),
            None => return,
        };

        debug!("触发事件: {} ({} 个监听器)", event, snapshot.len());

        for entry in &snapshot {
            if (entry.listener)(payload).is_stop() {
                debug!("监听器 {} 停止了事件 {} 的分发", entry.name, event);
                break;
            }
        }
    }

    fn off(&self, event: &str, name: &str) -> usize {
        let mut listeners = self.listeners.write();
        let Some(entries) = listeners.get_mut(event) else {
            return 0;
        };

        let before = entries.len();
        entries.retain(|entry| entry.name != name);
        let removed = before - entries.len();

        if entries.is_empty() {
            listeners.remove(event);
        }
        if removed > 0 {
            info!("移除事件监听器: {} -> {} ({} 个)", event, name, removed);
        }
        removed
    }

    fn listener_names(&self, event: &str) -> Vec<String> {
        self.listeners
            .read()
            .get(event)
            .map(|entries| entries.iter().map(|entry| entry.name.clone()).collect())
            .unwrap_or_default()
    }

    // 只取长度，不复制监听器名称
    fn listener_count(&self, event: &str) -> usize {
        self.listeners.read().get(event).map_or(0, Vec::len)
    }

    fn events(&self) -> Vec<String> {
        let mut events: Vec<String> = self.listeners.read().keys().cloned().collect();
        events.sort();
        events
    }
}
