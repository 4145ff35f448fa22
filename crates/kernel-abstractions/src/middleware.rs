//! 中间件链执行器抽象接口

use nano_common::{Args, KernelResult};
use std::sync::Arc;

/// 中间件处理函数类型
///
/// 执行器每次只调用一个处理函数。处理函数通过 [`Next::run`] 把参数交给
/// 下一个处理函数；直接返回则结束本次运行，返回值即为调用结果。
pub type Handler = Arc<dyn Fn(Next<'_>, Args) -> KernelResult<Args> + Send + Sync>;

/// 把闭包包装为处理函数
pub fn handler<F>(callback: F) -> Handler
where
    F: Fn(Next<'_>, Args) -> KernelResult<Args> + Send + Sync + 'static,
{
    Arc::new(callback)
}

/// 空白处理函数，原样返回参数
///
/// 作为链的隐式终点，使空链表现为恒等变换，最后一个处理函数向前调用也是安全的。
pub fn blank_handler() -> Handler {
    handler(|_next, args| Ok(args))
}

/// 当前链的后续部分
#[derive(Clone, Copy)]
pub struct Next<'a> {
    runner: &'a dyn MiddlewareRunner,
    stack_id: &'a str,
}

impl<'a> Next<'a> {
    /// 创建指向指定栈的后续句柄
    pub fn new(runner: &'a dyn MiddlewareRunner, stack_id: &'a str) -> Self {
        Self { runner, stack_id }
    }

    /// 当前栈标识
    pub fn stack_id(&self) -> &'a str {
        self.stack_id
    }

    /// 调用链中的下一个处理函数
    pub fn run(&self, args: Args) -> KernelResult<Args> {
        self.runner.invoke(self.stack_id, args)
    }
}

impl std::fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Next")
            .field("stack_id", &self.stack_id)
            .finish()
    }
}

/// 中间件调用
///
/// 同一个入口既可以注册处理函数，也可以调用链。
#[derive(Clone)]
pub enum MiddlewareCall {
    /// 在栈尾追加处理函数
    Register(Handler),
    /// 以给定参数调用链
    Invoke(Args),
}

impl std::fmt::Debug for MiddlewareCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Register(_) => f.debug_tuple("Register").field(&"<function>").finish(),
            Self::Invoke(args) => f.debug_tuple("Invoke").field(args).finish(),
        }
    }
}

/// 中间件链执行器 trait
///
/// 每个栈标识拥有独立的处理函数序列和游标。
pub trait MiddlewareRunner: Send + Sync {
    /// 在栈尾追加处理函数，栈不存在时隐式创建
    fn register_handler(&self, stack_id: &str, handler: Handler) -> KernelResult<()>;

    /// 以给定参数调用链，返回最终参数
    fn invoke(&self, stack_id: &str, args: Args) -> KernelResult<Args>;

    /// 预先声明空栈
    fn declare(&self, stack_id: &str) -> KernelResult<()>;

    /// 栈是否存在
    fn has_stack(&self, stack_id: &str) -> bool;

    /// 栈中处理函数数量，栈不存在时为 0
    fn handler_count(&self, stack_id: &str) -> usize;

    /// 所有栈标识（已排序）
    fn stack_ids(&self) -> Vec<String>;

    /// 注册闭包处理函数
    fn register<F>(&self, stack_id: &str, callback: F) -> KernelResult<()>
    where
        Self: Sized,
        F: Fn(Next<'_>, Args) -> KernelResult<Args> + Send + Sync + 'static,
    {
        self.register_handler(stack_id, handler(callback))
    }

    /// 统一入口：注册模式返回 `None`，调用模式返回最终参数
    fn call(&self, stack_id: &str, call: MiddlewareCall) -> KernelResult<Option<Args>> {
        match call {
            MiddlewareCall::Register(handler) => {
                self.register_handler(stack_id, handler)?;
                Ok(None)
            }
            MiddlewareCall::Invoke(args) => self.invoke(stack_id, args).map(Some),
        }
    }
}
