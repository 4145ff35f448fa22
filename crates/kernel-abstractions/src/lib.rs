//! # Kernel Abstractions
//!
//! 四个内核原语的抽象接口。
//!
//! ## 核心接口
//!
//! - [`ServiceRegistry`] - 服务注册表接口
//! - [`ParameterStore`] - 参数存储接口
//! - [`EventDispatcher`] - 事件分发器接口
//! - [`MiddlewareRunner`] - 中间件链执行器接口
//!
//! 每个原语除了具名方法外，还提供 `dispatch`：以 (键, 操作枚举) 的形式寻址，
//! 操作负载带有类型，通过模式匹配分发。

pub mod events;
pub mod middleware;
pub mod parameters;
pub mod registry;

pub use events::*;
pub use middleware::*;
pub use parameters::*;
pub use registry::*;
