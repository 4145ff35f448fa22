//! 事件分发器抽象接口

use nano_common::{Args, KernelError, KernelResult, OperationKind, Value};
use std::sync::Arc;

/// 事件分发器支持的操作
pub const EVENT_OPERATIONS: &[OperationKind] = &[OperationKind::On, OperationKind::Emit];

/// 监听器返回后分发是否继续
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    /// 继续调用后续监听器
    #[default]
    Continue,
    /// 停止本次分发
    Stop,
}

impl Propagation {
    /// 是否停止
    pub fn is_stop(self) -> bool {
        matches!(self, Self::Stop)
    }
}

impl From<()> for Propagation {
    fn from(_: ()) -> Self {
        Self::Continue
    }
}

/// 映射中包含 `"stop": true` 时停止
impl From<Value> for Propagation {
    fn from(value: Value) -> Self {
        match value.get("stop") {
            Some(Value::Bool(true)) => Self::Stop,
            _ => Self::Continue,
        }
    }
}

impl From<Option<Value>> for Propagation {
    fn from(value: Option<Value>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }
}

/// 事件监听器类型
pub type Listener = Arc<dyn Fn(&[Value]) -> Propagation + Send + Sync>;

/// 把闭包包装为监听器
///
/// 闭包可以返回 `()`、[`Propagation`] 或 JSON 值。
pub fn listener<F, R>(callback: F) -> Listener
where
    F: Fn(&[Value]) -> R + Send + Sync + 'static,
    R: Into<Propagation>,
{
    Arc::new(move |payload: &[Value]| -> Propagation { callback(payload).into() })
}

/// 事件分发器操作
#[derive(Clone)]
pub enum EventOp {
    /// 注册监听器，缺少监听器时为参数错误
    On {
        name: String,
        listener: Option<Listener>,
    },
    /// 触发事件
    Emit(Args),
}

impl EventOp {
    /// 操作种类
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::On { .. } => OperationKind::On,
            Self::Emit(_) => OperationKind::Emit,
        }
    }
}

impl std::fmt::Debug for EventOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On { name, listener } => f
                .debug_struct("On")
                .field("name", name)
                .field("listener", &listener.as_ref().map(|_| "<function>"))
                .finish(),
            Self::Emit(payload) => f.debug_tuple("Emit").field(payload).finish(),
        }
    }
}

/// 事件分发器 trait
///
/// 同一事件的监听器按注册顺序调用；同名重复注册会追加而不是替换。
pub trait EventDispatcher: Send + Sync {
    /// 注册监听器
    fn add_listener(&self, event: &str, name: &str, listener: Listener) -> KernelResult<()>;

    /// 触发事件，没有监听器时什么也不做
    fn emit(&self, event: &str, payload: &[Value]);

    /// 移除指定名称的全部监听器，返回移除数量
    fn off(&self, event: &str, name: &str) -> usize;

    /// 事件的监听器名称（按注册顺序）
    fn listener_names(&self, event: &str) -> Vec<String>;

    /// 事件的监听器数量
    fn listener_count(&self, event: &str) -> usize {
        self.listener_names(event).len()
    }

    /// 有监听器的事件（已排序）
    fn events(&self) -> Vec<String>;

    /// 注册闭包监听器
    fn on<F, R>(&self, event: &str, name: &str, callback: F) -> KernelResult<()>
    where
        Self: Sized,
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
        R: Into<Propagation>,
    {
        self.add_listener(event, name, listener(callback))
    }

    /// 以操作枚举寻址
    fn dispatch(&self, event: &str, op: EventOp) -> KernelResult<()> {
        match op {
            EventOp::On {
                name,
                listener: Some(listener),
            } => self.add_listener(event, &name, listener),
            EventOp::On { name, listener: None } => Err(KernelError::argument(format!(
                "事件 {event} 的监听器 {name} 缺少回调函数"
            ))),
            EventOp::Emit(payload) => {
                self.emit(event, &payload);
                Ok(())
            }
        }
    }
}
