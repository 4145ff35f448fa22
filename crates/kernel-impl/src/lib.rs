//! # 内核原语具体实现
//!
//! 提供注册表、参数存储、事件分发器和中间件链执行器的具体实现。
//! 每个实现都是显式实例化的结构体，可以放进 `Arc` 在线程之间共享；
//! 回调（工厂、监听器、处理函数）执行时不持有任何内部锁。

pub mod chain;
pub mod events;
pub mod middleware;
pub mod parameters;
pub mod registry;

pub use chain::MiddlewareChain;
pub use events::EventDispatcherImpl;
pub use middleware::MiddlewareStacks;
pub use parameters::ParameterStoreImpl;
pub use registry::ServiceRegistryImpl;
