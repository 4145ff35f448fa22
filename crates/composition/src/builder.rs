//! 内核构建器

use crate::config_loader::load_config_file;
use crate::kernel::Kernel;
use nano_abstractions::{MiddlewareRunner, ParameterStore};
use nano_common::{CompositionError, CompositionResult, KernelConfig, LoggingConfig, Value};
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// 内核构建器
///
/// 使用建造者模式组装内核：合并配置文件、预置参数、预先声明中间件栈，
/// 并按需初始化日志。
#[derive(Debug, Default)]
pub struct KernelBuilder {
    /// 合并后的配置
    config: KernelConfig,
}

impl KernelBuilder {
    /// 创建新的内核构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用完整配置替换当前配置
    pub fn with_config(mut self, config: KernelConfig) -> Self {
        self.config = config;
        self
    }

    /// 合并配置文件
    ///
    /// 后加入的文件覆盖同名参数，栈列表去重追加；
    /// 文件中启用的日志配置替换当前日志配置。
    pub fn add_config_file<P: AsRef<Path>>(mut self, path: P) -> CompositionResult<Self> {
        let path = path.as_ref();
        info!("添加配置文件: {}", path.display());

        let loaded = load_config_file(path)?;
        self.merge(loaded);
        Ok(self)
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.config.logging = config;
        self
    }

    /// 预置单个参数
    pub fn with_parameter<K: Into<String>>(mut self, key: K, value: Value) -> Self {
        self.config.parameters.insert(key.into(), value);
        self
    }

    /// 预先声明中间件栈
    pub fn declare_stack<S: Into<String>>(mut self, stack_id: S) -> Self {
        let stack_id = stack_id.into();
        if !self.config.middleware.stacks.contains(&stack_id) {
            self.config.middleware.stacks.push(stack_id);
        }
        self
    }

    /// 当前配置
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// 构建内核
    pub fn build(self) -> CompositionResult<Kernel> {
        self.config.validate()?;

        if self.config.logging.enabled {
            self.initialize_logging()?;
        }

        info!("开始构建内核");
        let kernel = Kernel::new();

        kernel.parameters().extend(self.config.parameters)?;
        for stack_id in &self.config.middleware.stacks {
            kernel.middleware().declare(stack_id)?;
        }

        let summary = kernel.summary();
        info!(
            "内核构建完成: {} 个参数, {} 个栈",
            summary.parameters, summary.stacks
        );
        Ok(kernel)
    }

    fn merge(&mut self, other: KernelConfig) {
        if other.logging.enabled {
            self.config.logging = other.logging;
        }

        for (key, value) in other.parameters {
            if self.config.parameters.insert(key.clone(), value).is_some() {
                debug!("配置文件覆盖参数: {}", key);
            }
        }

        for stack_id in other.middleware.stacks {
            if !self.config.middleware.stacks.contains(&stack_id) {
                self.config.middleware.stacks.push(stack_id);
            }
        }
    }

    /// 初始化日志系统
    ///
    /// `RUST_LOG` 存在时优先使用，否则使用配置中的级别。
    fn initialize_logging(&self) -> CompositionResult<()> {
        let logging = &self.config.logging;
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(logging.level.as_tracing_level()).into())
            .from_env_lossy();

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(logging.show_target)
            .with_thread_ids(logging.show_thread_ids)
            .with_file(logging.show_file)
            .with_line_number(logging.show_line_number);

        if logging.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| CompositionError::BootstrapFailed {
            message: format!("日志初始化失败: {}", e),
        })
    }
}
