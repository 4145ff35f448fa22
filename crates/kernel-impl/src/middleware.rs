//! 多栈中间件链执行器实现
//!
//! 每个栈保存一个显式游标和一个运行深度：
//!
//! - 深度为 0 时进入的调用是一次新的运行，游标复位到第一个处理函数；
//! - 每次调用只取出游标处的一个处理函数，游标加一，然后在不持锁的情况下调用它；
//! - 执行器不会自动串联处理函数，处理函数通过 [`Next::run`] 向前调用，
//!   不向前调用就直接结束本次运行，其返回值即为结果；
//! - 游标越过最后一个处理函数后，由空白处理函数原样返回参数。
//!
//! 同一个栈的游标是共享状态，调用方必须等一次调用结束再开始下一次。

use nano_abstractions::{blank_handler, Handler, MiddlewareRunner, Next};
use nano_common::{require_key, Args, EntryKind, KernelError, KernelResult};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{debug, info, trace};

/// 单个栈的状态
#[derive(Default)]
struct StackState {
    /// 处理函数序列
    handlers: Vec<Handler>,
    /// 下一个要调用的处理函数位置
    cursor: usize,
    /// 正在进行的嵌套调用层数
    depth: usize,
}

impl std::fmt::Debug for StackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StackState")
            .field("handlers", &self.handlers.len())
            .field("cursor", &self.cursor)
            .field("depth", &self.depth)
            .finish()
    }
}

/// 一次进入的运行深度，离开作用域时归还
///
/// 处理函数返回错误或 panic 时也会归还，栈不会卡在运行中的状态。
struct RunGuard<'a> {
    stacks: &'a MiddlewareStacks,
    stack_id: &'a str,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if let Some(state) = self.stacks.stacks.lock().get_mut(self.stack_id) {
            state.depth = state.depth.saturating_sub(1);
        }
    }
}

/// 多栈中间件链执行器
pub struct MiddlewareStacks {
    stacks: Mutex<HashMap<String, StackState>>,
    terminal: Handler,
}

impl std::fmt::Debug for MiddlewareStacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiddlewareStacks")
            .field("stacks", &*self.stacks.lock())
            .finish()
    }
}

impl Default for MiddlewareStacks {
    fn default() -> Self {
        Self::new()
    }
}

impl MiddlewareStacks {
    /// 创建新的执行器
    pub fn new() -> Self {
        Self {
            stacks: Mutex::new(HashMap::new()),
            terminal: blank_handler(),
        }
    }

    /// 创建带有一个空栈的执行器
    pub(crate) fn with_stack(stack_id: &str) -> Self {
        let stacks = Self::new();
        stacks
            .stacks
            .lock()
            .insert(stack_id.to_string(), StackState::default());
        stacks
    }

    /// 进入一次调用，深度为 0 时复位游标
    fn enter<'a>(&'a self, stack_id: &'a str) -> KernelResult<RunGuard<'a>> {
        let mut stacks = self.stacks.lock();
        let state = stacks
            .get_mut(stack_id)
            .ok_or_else(|| KernelError::not_found(EntryKind::Stack, stack_id))?;

        if state.depth == 0 {
            trace!("栈 {} 开始新的运行", stack_id);
            state.cursor = 0;
        }
        state.depth += 1;
        Ok(RunGuard {
            stacks: self,
            stack_id,
        })
    }

    /// 取出游标处的处理函数并前进，链已走完时取出空白处理函数
    fn advance(&self, stack_id: &str) -> KernelResult<Handler> {
        let mut stacks = self.stacks.lock();
        let state = stacks
            .get_mut(stack_id)
            .ok_or_else(|| KernelError::not_found(EntryKind::Stack, stack_id))?;

        match state.handlers.get(state.cursor).cloned() {
            Some(handler) => {
                trace!("栈 {} 取出处理函数 #{}", stack_id, state.cursor);
                state.cursor += 1;
                Ok(handler)
            }
            None => Ok(self.terminal.clone()),
        }
    }
}

impl MiddlewareRunner for MiddlewareStacks {
    fn register_handler(&self, stack_id: &str, handler: Handler) -> KernelResult<()> {
        require_key("栈标识", stack_id)?;

        let mut stacks = self.stacks.lock();
        let state = stacks.entry(stack_id.to_string()).or_default();
        state.handlers.push(handler);
        info!(
            "注册中间件处理函数: {} #{}",
            stack_id,
            state.handlers.len() - 1
        );
        Ok(())
    }

    fn invoke(&self, stack_id: &str, args: Args) -> KernelResult<Args> {
        require_key("栈标识", stack_id)?;

        let _guard = self.enter(stack_id)?;
        let handler = self.advance(stack_id)?;
        let result = handler(Next::new(self, stack_id), args);

        if let Err(e) = &result {
            debug!("栈 {} 运行失败: {}", stack_id, e);
        }
        result
    }

    fn declare(&self, stack_id: &str) -> KernelResult<()> {
        require_key("栈标识", stack_id)?;

        let mut stacks = self.stacks.lock();
        if !stacks.contains_key(stack_id) {
            info!("声明中间件栈: {}", stack_id);
            stacks.insert(stack_id.to_string(), StackState::default());
        }
        Ok(())
    }

    fn has_stack(&self, stack_id: &str) -> bool {
        self.stacks.lock().contains_key(stack_id)
    }

    fn handler_count(&self, stack_id: &str) -> usize {
        self.stacks
            .lock()
            .get(stack_id)
            .map_or(0, |state| state.handlers.len())
    }

    fn stack_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.stacks.lock().keys().cloned().collect();
        ids.sort();
        ids
    }
}
