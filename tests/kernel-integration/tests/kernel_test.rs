//! 通过组合层驱动四个原语的集成测试

use anyhow::Result;
use nano_abstractions::{
    EventDispatcher, MiddlewareCall, MiddlewareRunner, Next, ParameterStore, ServiceRegistry,
};
use nano_common::{Args, EntryKind, KernelError, KernelResult, Lifetime, Value};
use nano_composition::{Kernel, KernelBuilder};
use nano_impl::MiddlewareChain;
use serde::Deserialize;
use serde_json::json;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// 测试用仓储服务
#[derive(Debug)]
struct UserRepository {
    users: Vec<String>,
}

/// 数据库参数
#[derive(Debug, Deserialize, PartialEq)]
struct DatabaseSettings {
    host: String,
    port: u16,
}

fn counted<T, F>(counter: &Arc<AtomicUsize>, create: F) -> impl Fn() -> T + Send + Sync + 'static
where
    T: 'static,
    F: Fn() -> T + Send + Sync + 'static,
{
    let counter = counter.clone();
    move || {
        counter.fetch_add(1, Ordering::SeqCst);
        create()
    }
}

fn tag(label: &'static str) -> impl Fn(Next<'_>, Args) -> KernelResult<Args> + Send + Sync + 'static {
    move |next, mut args| {
        args.push(json!(label));
        next.run(args)
    }
}

#[test]
fn test_singleton_and_transient_lifetimes() -> Result<()> {
    let kernel = Kernel::new();
    let singleton_calls = Arc::new(AtomicUsize::new(0));
    let transient_calls = Arc::new(AtomicUsize::new(0));

    kernel.registry().set(
        "users",
        counted(&singleton_calls, || UserRepository {
            users: vec!["alice".to_string()],
        }),
    )?;
    kernel
        .registry()
        .set("_users", counted(&transient_calls, || UserRepository { users: vec![] }))?;

    assert_eq!(kernel.registry().lifetime("users"), Some(Lifetime::Singleton));
    assert_eq!(kernel.registry().lifetime("_users"), Some(Lifetime::Transient));
    assert_eq!(singleton_calls.load(Ordering::SeqCst), 0);

    let a = kernel.registry().get_as::<UserRepository>("users")?;
    let b = kernel.registry().get_as::<UserRepository>("users")?;
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.users, vec!["alice"]);
    assert_eq!(singleton_calls.load(Ordering::SeqCst), 1);

    let c = kernel.registry().get_as::<UserRepository>("_users")?;
    let d = kernel.registry().get_as::<UserRepository>("_users")?;
    assert!(!Arc::ptr_eq(&c, &d));
    assert_eq!(transient_calls.load(Ordering::SeqCst), 2);
    Ok(())
}

#[test]
fn test_has_and_not_found() -> Result<()> {
    let kernel = Kernel::new();

    assert!(!kernel.registry().has("mailer"));
    kernel.registry().set("mailer", || "smtp")?;
    assert!(kernel.registry().has("mailer"));

    let err = kernel.registry().get("missing").unwrap_err();
    assert!(matches!(
        err,
        KernelError::NotFound {
            kind: EntryKind::Service,
            ..
        }
    ));

    assert!(!kernel.parameters().has("timeout"));
    kernel.parameters().set("timeout", json!(30))?;
    assert!(kernel.parameters().has("timeout"));
    assert_eq!(kernel.parameters().get("timeout")?, json!(30));

    let err = kernel.parameters().get("retries").unwrap_err();
    assert!(matches!(
        err,
        KernelError::NotFound {
            kind: EntryKind::Parameter,
            ..
        }
    ));
    assert_eq!(
        kernel.parameters().get_or_default("retries", json!(3)),
        json!(3)
    );
    Ok(())
}

#[test]
fn test_event_order_and_stop() -> Result<()> {
    let kernel = Kernel::new();
    let calls = Arc::new(Mutex::new(Vec::new()));

    for (name, stop) in [("audit", false), ("guard", true), ("mailer", false)] {
        let calls = calls.clone();
        kernel.events().on("order.placed", name, move |payload: &[Value]| {
            calls
                .lock()
                .unwrap()
                .push(format!("{}:{}", name, payload.len()));
            json!({ "stop": stop })
        })?;
    }

    kernel
        .events()
        .emit("order.placed", &[json!({ "id": 7 }), json!("eur")]);
    assert_eq!(*calls.lock().unwrap(), vec!["audit:2", "guard:2"]);

    // 移除停止者之后第三个监听器可以被调用
    assert_eq!(kernel.events().off("order.placed", "guard"), 1);
    kernel.events().emit("order.placed", &[]);
    assert_eq!(
        *calls.lock().unwrap(),
        vec!["audit:2", "guard:2", "audit:0", "mailer:0"]
    );
    Ok(())
}

#[test]
fn test_middleware_restarts_each_invocation() -> Result<()> {
    let kernel = Kernel::new();
    kernel.middleware().register("s", tag("A"))?;
    kernel.middleware().register("s", tag("B"))?;

    for _ in 0..3 {
        let out = kernel.middleware().invoke("s", vec![json!("in")])?;
        assert_eq!(out, vec![json!("in"), json!("A"), json!("B")]);
    }
    Ok(())
}

#[test]
fn test_guard_handler_answers_without_forwarding() -> Result<()> {
    let kernel = KernelBuilder::new()
        .with_parameter("auth.token", json!("secret"))
        .build()?;
    let reached = Arc::new(AtomicUsize::new(0));

    let ctx = kernel.clone();
    kernel.middleware().register("api", move |next, args| {
        let expected = ctx.parameters().get("auth.token")?;
        if args.first() != Some(&expected) {
            return Ok(vec![json!(401)]);
        }
        next.run(args)
    })?;
    let counter = reached.clone();
    kernel.middleware().register("api", move |_next, _args| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(vec![json!(200)])
    })?;

    assert_eq!(kernel.middleware().invoke("api", vec![json!("guess")])?, vec![json!(401)]);
    assert_eq!(reached.load(Ordering::SeqCst), 0);

    assert_eq!(kernel.middleware().invoke("api", vec![json!("secret")])?, vec![json!(200)]);
    assert_eq!(reached.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_zero_handler_invocations_are_identity() -> Result<()> {
    let kernel = KernelBuilder::new().declare_stack("idle").build()?;
    let args = vec![json!({ "k": [1, 2] }), json!(null)];
    assert_eq!(kernel.middleware().invoke("idle", args.clone())?, args);

    let chain = MiddlewareChain::new();
    assert_eq!(chain.invoke(args.clone())?, args);
    Ok(())
}

#[test]
fn test_stack_isolation_and_unknown_stack() -> Result<()> {
    let kernel = Kernel::new();
    kernel.middleware().register("http", tag("http"))?;
    kernel.middleware().register("cli", tag("cli"))?;

    assert_eq!(kernel.middleware().invoke("http", vec![])?, vec![json!("http")]);
    assert_eq!(kernel.middleware().invoke("cli", vec![])?, vec![json!("cli")]);

    let err = kernel.middleware().invoke("queue", vec![]).unwrap_err();
    assert!(matches!(
        err,
        KernelError::NotFound {
            kind: EntryKind::Stack,
            ..
        }
    ));
    Ok(())
}

#[test]
fn test_onion_handlers_share_kernel() -> Result<()> {
    let kernel = KernelBuilder::new()
        .with_parameter("greeting", json!("hello"))
        .build()?;
    kernel.registry().set("counter", || AtomicUsize::new(0))?;

    let ctx = kernel.clone();
    kernel.middleware().register("request", move |next, mut args| {
        let counter = ctx.registry().get_as::<AtomicUsize>("counter")?;
        counter.fetch_add(1, Ordering::SeqCst);
        args.push(json!("before"));
        let mut args = next.run(args)?;
        args.push(json!("after"));
        ctx.events().emit("request.done", &args);
        Ok(args)
    })?;

    let ctx = kernel.clone();
    kernel.middleware().register("request", move |_next, mut args| {
        args.push(ctx.parameters().get("greeting")?);
        Ok(args)
    })?;

    let seen = Arc::new(Mutex::new(0));
    let sink = seen.clone();
    kernel
        .events()
        .on("request.done", "size", move |payload: &[Value]| {
            *sink.lock().unwrap() = payload.len();
        })?;

    let out = kernel.middleware().invoke("request", vec![])?;
    assert_eq!(out, vec![json!("before"), json!("hello"), json!("after")]);
    assert_eq!(*seen.lock().unwrap(), 3);

    kernel.middleware().invoke("request", vec![])?;
    let counter = kernel.registry().get_as::<AtomicUsize>("counter")?;
    assert_eq!(counter.load(Ordering::SeqCst), 2);
    Ok(())
}

#[test]
fn test_unified_middleware_call() -> Result<()> {
    let kernel = Kernel::new();
    let registered = kernel.middleware().call(
        "s",
        MiddlewareCall::Register(nano_abstractions::handler(tag("x"))),
    )?;
    assert!(registered.is_none());

    let invoked = kernel
        .middleware()
        .call("s", MiddlewareCall::Invoke(vec![json!(0)]))?;
    assert_eq!(invoked, Some(vec![json!(0), json!("x")]));
    Ok(())
}

#[test]
fn test_bootstrap_from_config_file() -> Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    write!(
        file,
        r#"
[parameters]
"app.name" = "shop"

[parameters.database]
host = "localhost"
port = 5432

[middleware]
stacks = ["http"]
"#
    )?;

    let kernel = KernelBuilder::new().add_config_file(file.path())?.build()?;

    assert_eq!(kernel.parameters().get("app.name")?, json!("shop"));
    let database: DatabaseSettings = kernel.parameters().get_as("database")?;
    assert_eq!(
        database,
        DatabaseSettings {
            host: "localhost".to_string(),
            port: 5432,
        }
    );
    assert!(kernel.middleware().has_stack("http"));
    assert_eq!(kernel.middleware().invoke("http", vec![json!(1)])?, vec![json!(1)]);
    Ok(())
}
