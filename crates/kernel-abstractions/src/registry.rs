//! 服务注册表抽象接口

use nano_common::{KernelError, KernelResult, Lifetime, OperationKind, Service};
use std::sync::Arc;

/// 服务工厂函数类型
pub type Factory = Arc<dyn Fn() -> KernelResult<Service> + Send + Sync>;

/// 注册表支持的操作
pub const REGISTRY_OPERATIONS: &[OperationKind] =
    &[OperationKind::Has, OperationKind::Set, OperationKind::Get];

/// 把无参闭包包装为工厂
pub fn factory<T, F>(create: F) -> Factory
where
    T: Send + Sync + 'static,
    F: Fn() -> T + Send + Sync + 'static,
{
    Arc::new(move || -> KernelResult<Service> { Ok(Arc::new(create()) as Service) })
}

/// 把可能失败的无参闭包包装为工厂
pub fn try_factory<T, F>(create: F) -> Factory
where
    T: Send + Sync + 'static,
    F: Fn() -> KernelResult<T> + Send + Sync + 'static,
{
    Arc::new(move || create().map(|value| Arc::new(value) as Service))
}

/// 注册表操作
#[derive(Clone)]
pub enum RegistryOp {
    /// 检查服务是否存在
    Has,
    /// 注册工厂，缺少工厂时为参数错误
    Set(Option<Factory>),
    /// 解析服务
    Get,
}

impl RegistryOp {
    /// 操作种类
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Has => OperationKind::Has,
            Self::Set(_) => OperationKind::Set,
            Self::Get => OperationKind::Get,
        }
    }
}

impl std::fmt::Debug for RegistryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Has => f.write_str("Has"),
            Self::Set(factory) => f
                .debug_tuple("Set")
                .field(&factory.as_ref().map(|_| "<function>"))
                .finish(),
            Self::Get => f.write_str("Get"),
        }
    }
}

/// 注册表操作结果
#[derive(Clone)]
pub enum RegistryReply {
    /// `Has` 的结果
    Exists(bool),
    /// `Set` 完成
    Stored,
    /// `Get` 解析出的服务
    Service(Service),
}

impl std::fmt::Debug for RegistryReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exists(exists) => f.debug_tuple("Exists").field(exists).finish(),
            Self::Stored => f.write_str("Stored"),
            Self::Service(_) => f.debug_tuple("Service").field(&"<instance>").finish(),
        }
    }
}

/// 服务注册表 trait
///
/// 标识符以 `_` 开头的服务为瞬时服务，其余为单例。
pub trait ServiceRegistry: Send + Sync {
    /// 检查服务是否已注册
    fn has(&self, id: &str) -> bool;

    /// 注册工厂，同名注册会替换旧条目并丢弃其缓存
    fn set_factory(&self, id: &str, factory: Factory) -> KernelResult<()>;

    /// 注册已创建的实例，总是作为单例共享
    fn set_instance(&self, id: &str, instance: Service) -> KernelResult<()>;

    /// 解析服务
    fn get(&self, id: &str) -> KernelResult<Service>;

    /// 获取已注册服务的生命周期
    fn lifetime(&self, id: &str) -> Option<Lifetime>;

    /// 所有已注册的标识符（已排序）
    fn ids(&self) -> Vec<String>;

    /// 已注册服务数量
    fn len(&self) -> usize {
        self.ids().len()
    }

    /// 是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 注册无参闭包
    fn set<T, F>(&self, id: &str, create: F) -> KernelResult<()>
    where
        Self: Sized,
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.set_factory(id, factory(create))
    }

    /// 按具体类型解析服务
    fn get_as<T>(&self, id: &str) -> KernelResult<Arc<T>>
    where
        Self: Sized,
        T: Send + Sync + 'static,
    {
        self.get(id)?
            .downcast::<T>()
            .map_err(|_| KernelError::type_mismatch(id, std::any::type_name::<T>()))
    }

    /// 以操作枚举寻址
    fn dispatch(&self, id: &str, op: RegistryOp) -> KernelResult<RegistryReply> {
        match op {
            RegistryOp::Has => Ok(RegistryReply::Exists(self.has(id))),
            RegistryOp::Set(Some(factory)) => {
                self.set_factory(id, factory)?;
                Ok(RegistryReply::Stored)
            }
            RegistryOp::Set(None) => Err(KernelError::argument(format!(
                "服务 {id} 缺少工厂函数"
            ))),
            RegistryOp::Get => self.get(id).map(RegistryReply::Service),
        }
    }
}
