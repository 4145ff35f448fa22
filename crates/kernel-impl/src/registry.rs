//! 服务注册表实现

use nano_abstractions::{Factory, ServiceRegistry, REGISTRY_OPERATIONS};
use nano_common::{
    require_key, EntryKind, KernelError, KernelResult, Lifetime, OperationKind, Service,
};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 服务注册信息
struct ServiceEntry {
    /// 生命周期
    lifetime: Lifetime,
    /// 工厂函数
    factory: Factory,
    /// 单例实例缓存，随条目一起替换
    instance: Arc<OnceCell<Service>>,
}

impl std::fmt::Debug for ServiceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceEntry")
            .field("lifetime", &self.lifetime)
            .field("factory", &"<function>")
            .field("instance_created", &self.instance.get().is_some())
            .finish()
    }
}

/// 服务注册表实现
///
/// 单例的工厂在条目自己的 `OnceCell` 中执行，不持有注册表锁，
/// 因此工厂内部可以继续解析其它服务。
#[derive(Debug, Default)]
pub struct ServiceRegistryImpl {
    entries: RwLock<HashMap<String, ServiceEntry>>,
}

impl ServiceRegistryImpl {
    /// 创建新的注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 校验字符串操作码
    pub fn check_operation(name: &str) -> KernelResult<OperationKind> {
        OperationKind::parse_supported(name, REGISTRY_OPERATIONS)
    }

    fn insert(&self, id: &str, entry: ServiceEntry) {
        let lifetime = entry.lifetime;
        let replaced = self.entries.write().insert(id.to_string(), entry);

        if replaced.is_some() {
            warn!("替换已注册的服务: {} ({})", id, lifetime);
        } else {
            info!("注册服务: {} ({})", id, lifetime);
        }
    }
}

impl ServiceRegistry for ServiceRegistryImpl {
    fn has(&self, id: &str) -> bool {
        self.entries.read().contains_key(id)
    }

    fn set_factory(&self, id: &str, factory: Factory) -> KernelResult<()> {
        require_key("服务标识", id)?;

        self.insert(
            id,
            ServiceEntry {
                lifetime: Lifetime::from_identifier(id),
                factory,
                instance: Arc::new(OnceCell::new()),
            },
        );
        Ok(())
    }

    fn set_instance(&self, id: &str, instance: Service) -> KernelResult<()> {
        require_key("服务标识", id)?;

        let shared = instance.clone();
        let factory: Factory = Arc::new(move || -> KernelResult<Service> { Ok(shared.clone()) });
        self.insert(
            id,
            ServiceEntry {
                lifetime: Lifetime::Singleton,
                factory,
                instance: Arc::new(OnceCell::with_value(instance)),
            },
        );
        Ok(())
    }

    fn get(&self, id: &str) -> KernelResult<Service> {
        let (lifetime, factory, instance) = {
            let entries = self.entries.read();
            let entry = entries
                .get(id)
                .ok_or_else(|| KernelError::not_found(EntryKind::Service, id))?;
            (entry.lifetime, entry.factory.clone(), entry.instance.clone())
        };

        match lifetime {
            Lifetime::Transient => {
                debug!("创建瞬时服务实例: {}", id);
                factory()
            }
            Lifetime::Singleton => instance
                .get_or_try_init(|| {
                    debug!("创建单例服务实例: {}", id);
                    factory()
                })
                .cloned(),
        }
    }

    fn lifetime(&self, id: &str) -> Option<Lifetime> {
        self.entries.read().get(id).map(|entry| entry.lifetime)
    }

    fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    // 只取长度，不复制并排序标识符
    fn len(&self) -> usize {
        self.entries.read().len()
    }
}
