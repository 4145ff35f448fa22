//! # Nano Common
//!
//! 这个 crate 提供了 nano kernel 四个原语共享的基础类型。
//!
//! ## 核心内容
//!
//! - [`KernelError`] - 原语操作的错误类型
//! - [`Lifetime`] - 服务生命周期（单例 / 瞬时）
//! - [`OperationKind`] - 字符串操作码解析
//! - [`KernelConfig`] - 内核配置
//!
//! ## 设计原则
//!
//! - 原语之间互不依赖，只共享这里的类型
//! - 所有状态由显式结构体持有，不使用进程级全局变量

pub mod configuration;
pub mod errors;
pub mod lifecycle;
pub mod operation;
pub mod value;

pub use configuration::*;
pub use errors::*;
pub use lifecycle::*;
pub use operation::*;
pub use value::*;
