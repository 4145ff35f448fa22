//! # 内核组合层
//!
//! 把四个原语组合成一个可共享的 [`Kernel`]，并负责配置加载和日志初始化。
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use nano_abstractions::{MiddlewareRunner, ParameterStore};
//! use nano_composition::KernelBuilder;
//! use serde_json::json;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let kernel = KernelBuilder::new()
//!         .add_config_file("kernel.toml")?
//!         .with_parameter("app.name", json!("demo"))
//!         .build()?;
//!
//!     let params = kernel.clone();
//!     kernel.middleware().register("http", move |next, mut args| {
//!         args.push(params.parameters().get_or_default("app.name", json!(null)));
//!         next.run(args)
//!     })?;
//!
//!     let out = kernel.middleware().invoke("http", vec![json!("GET /")])?;
//!     println!("{:?}", out);
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod config_loader;
pub mod kernel;

pub use builder::KernelBuilder;
pub use config_loader::{load_config_file, ConfigFormat};
pub use kernel::Kernel;
