//! 原语之间传递的值类型

use std::any::Any;
use std::sync::Arc;

/// 参数、事件负载和中间件参数使用的动态值
pub use serde_json::Value;

/// 中间件参数元组、事件负载
pub type Args = Vec<Value>;

/// 注册表产出的服务实例
pub type Service = Arc<dyn Any + Send + Sync>;
