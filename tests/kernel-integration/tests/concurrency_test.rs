//! 多线程共享内核的集成测试

use nano_abstractions::{EventDispatcher, MiddlewareRunner, ParameterStore, ServiceRegistry};
use nano_common::Value;
use nano_composition::Kernel;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// 创建较慢的共享服务
#[derive(Debug)]
struct ConnectionPool {
    size: usize,
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_singleton_created_once_under_contention() {
    let kernel = Kernel::new();
    let created = Arc::new(AtomicUsize::new(0));

    let counter = created.clone();
    kernel
        .registry()
        .set("pool", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(20));
            ConnectionPool { size: 8 }
        })
        .unwrap();

    let mut tasks = Vec::new();
    for _ in 0..16 {
        let kernel = kernel.clone();
        tasks.push(tokio::task::spawn_blocking(move || {
            kernel.registry().get_as::<ConnectionPool>("pool").unwrap()
        }));
    }

    let mut pools = Vec::new();
    for task in tasks {
        pools.push(task.await.unwrap());
    }

    assert_eq!(created.load(Ordering::SeqCst), 1);
    assert!(pools.iter().all(|pool| Arc::ptr_eq(pool, &pools[0])));
    assert_eq!(pools[0].size, 8);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_parameter_writes() {
    let kernel = Kernel::new();

    let mut tasks = Vec::new();
    for worker in 0..8 {
        let kernel = kernel.clone();
        tasks.push(tokio::spawn(async move {
            for i in 0..50 {
                kernel
                    .parameters()
                    .set(&format!("worker.{}.{}", worker, i), json!(i))
                    .unwrap();
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(kernel.parameters().len(), 8 * 50);
    assert_eq!(kernel.parameters().get("worker.7.49").unwrap(), json!(49));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_emits_reach_every_listener() {
    let kernel = Kernel::new();
    let received = Arc::new(AtomicUsize::new(0));

    for name in ["metrics", "audit"] {
        let received = received.clone();
        kernel
            .events()
            .on("tick", name, move |payload: &[Value]| {
                let weight = payload.first().and_then(Value::as_u64).unwrap_or(0);
                received.fetch_add(weight as usize, Ordering::SeqCst);
            })
            .unwrap();
    }

    let mut tasks = Vec::new();
    for _ in 0..10 {
        let kernel = kernel.clone();
        tasks.push(tokio::spawn(async move {
            for _ in 0..10 {
                kernel.events().emit("tick", &[json!(1)]);
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(received.load(Ordering::SeqCst), 2 * 10 * 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_distinct_stacks_run_in_parallel() {
    let kernel = Kernel::new();
    for stack in ["a", "b", "c", "d"] {
        kernel
            .middleware()
            .register(stack, move |_next, mut args| {
                args.push(json!(stack));
                Ok(args)
            })
            .unwrap();
    }

    let mut tasks = Vec::new();
    for stack in ["a", "b", "c", "d"] {
        let kernel = kernel.clone();
        tasks.push(tokio::spawn(async move {
            for round in 0..25 {
                let out = kernel.middleware().invoke(stack, vec![json!(round)]).unwrap();
                assert_eq!(out, vec![json!(round), json!(stack)]);
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }
}
