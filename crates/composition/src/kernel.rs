//! 内核主入口

use crate::builder::KernelBuilder;
use nano_abstractions::{EventDispatcher, MiddlewareRunner, ParameterStore, ServiceRegistry};
use nano_impl::{EventDispatcherImpl, MiddlewareStacks, ParameterStoreImpl, ServiceRegistryImpl};
use std::sync::Arc;

/// 内核
///
/// 持有四个原语的共享句柄。克隆只复制 `Arc`，中间件处理函数或监听器
/// 可以捕获一个克隆来访问注册表和参数存储。原语之间互不依赖。
#[derive(Debug, Clone, Default)]
pub struct Kernel {
    registry: Arc<ServiceRegistryImpl>,
    parameters: Arc<ParameterStoreImpl>,
    events: Arc<EventDispatcherImpl>,
    middleware: Arc<MiddlewareStacks>,
}

impl Kernel {
    /// 创建空内核
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建内核构建器
    pub fn builder() -> KernelBuilder {
        KernelBuilder::new()
    }

    /// 服务注册表
    pub fn registry(&self) -> &Arc<ServiceRegistryImpl> {
        &self.registry
    }

    /// 参数存储
    pub fn parameters(&self) -> &Arc<ParameterStoreImpl> {
        &self.parameters
    }

    /// 事件分发器
    pub fn events(&self) -> &Arc<EventDispatcherImpl> {
        &self.events
    }

    /// 中间件链执行器
    pub fn middleware(&self) -> &Arc<MiddlewareStacks> {
        &self.middleware
    }

    /// 内核状态摘要
    pub fn summary(&self) -> KernelSummary {
        KernelSummary {
            services: self.registry.len(),
            parameters: self.parameters.len(),
            events: self.events.events().len(),
            stacks: self.middleware.stack_ids().len(),
        }
    }
}

/// 内核状态摘要
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KernelSummary {
    /// 已注册服务数量
    pub services: usize,
    /// 参数数量
    pub parameters: usize,
    /// 有监听器的事件数量
    pub events: usize,
    /// 中间件栈数量
    pub stacks: usize,
}
