//! 单栈中间件链
//!
//! 只有一个匿名栈的变体。栈在创建时就存在，调用空链原样返回参数，
//! 永远不会出现栈未定义的错误。

use crate::middleware::MiddlewareStacks;
use nano_abstractions::{handler, Handler, MiddlewareCall, MiddlewareRunner, Next};
use nano_common::{Args, KernelResult};

/// 匿名栈的内部标识
const ANONYMOUS_STACK: &str = "__chain__";

/// 单栈中间件链
#[derive(Debug)]
pub struct MiddlewareChain {
    stacks: MiddlewareStacks,
}

impl Default for MiddlewareChain {
    fn default() -> Self {
        Self::new()
    }
}

impl MiddlewareChain {
    /// 创建空链
    pub fn new() -> Self {
        Self {
            stacks: MiddlewareStacks::with_stack(ANONYMOUS_STACK),
        }
    }

    /// 在链尾追加处理函数
    pub fn register_handler(&self, handler: Handler) -> KernelResult<()> {
        self.stacks.register_handler(ANONYMOUS_STACK, handler)
    }

    /// 在链尾追加闭包处理函数
    pub fn register<F>(&self, callback: F) -> KernelResult<()>
    where
        F: Fn(Next<'_>, Args) -> KernelResult<Args> + Send + Sync + 'static,
    {
        self.register_handler(handler(callback))
    }

    /// 以给定参数调用链
    pub fn invoke(&self, args: Args) -> KernelResult<Args> {
        self.stacks.invoke(ANONYMOUS_STACK, args)
    }

    /// 统一入口：注册模式返回 `None`，调用模式返回最终参数
    pub fn call(&self, call: MiddlewareCall) -> KernelResult<Option<Args>> {
        self.stacks.call(ANONYMOUS_STACK, call)
    }

    /// 处理函数数量
    pub fn len(&self) -> usize {
        self.stacks.handler_count(ANONYMOUS_STACK)
    }

    /// 是否没有处理函数
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
