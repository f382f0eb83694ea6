use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use outcome_rail::async_ext::ManagedRuntime;
use outcome_rail::AsyncResult;

#[derive(Debug, Clone, PartialEq)]
enum AppError {
    Startup(String),
    NotFound,
}

impl From<String> for AppError {
    fn from(message: String) -> Self {
        AppError::Startup(message)
    }
}

struct Registry {
    users: Vec<&'static str>,
}

fn counting_runtime(runs: Arc<AtomicUsize>) -> ManagedRuntime<Registry, String> {
    ManagedRuntime::new(move || {
        let runs = Arc::clone(&runs);
        async move {
            runs.fetch_add(1, Ordering::SeqCst);
            Ok(Registry { users: vec!["ada", "grace"] })
        }
    })
}

#[tokio::test]
async fn context_is_built_once_across_runs() {
    let runs = Arc::new(AtomicUsize::new(0));
    let runtime = counting_runtime(Arc::clone(&runs));
    assert!(!runtime.is_initialized());

    let first: AsyncResult<usize, AppError> =
        runtime.run(|registry| async move { Ok(registry.users.len()) }).await;
    let second: AsyncResult<&str, AppError> = runtime
        .run(|registry| async move { registry.users.first().copied().ok_or(AppError::NotFound) })
        .await;

    assert_eq!(first.value(), Some(&2));
    assert_eq!(second.value(), Some(&"ada"));
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(runtime.is_initialized());
}

#[tokio::test]
async fn typed_errors_from_work_stay_typed() {
    let runtime = counting_runtime(Arc::new(AtomicUsize::new(0)));

    let result: AsyncResult<usize, AppError> = runtime
        .run(|registry| async move {
            registry.users.iter().position(|u| *u == "linus").ok_or(AppError::NotFound)
        })
        .await;

    assert_eq!(result.error(), Some(&AppError::NotFound));
}

#[tokio::test]
async fn init_failure_becomes_typed_failure_and_is_retried() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);
    let runtime = ManagedRuntime::new(move || {
        let attempt = counter.fetch_add(1, Ordering::SeqCst);
        async move {
            if attempt == 0 {
                Err("database unreachable".to_string())
            } else {
                Ok(Registry { users: Vec::new() })
            }
        }
    });

    let failed: AsyncResult<usize, AppError> =
        runtime.run(|registry| async move { Ok(registry.users.len()) }).await;
    assert_eq!(failed.error(), Some(&AppError::Startup("database unreachable".into())));

    let recovered: AsyncResult<usize, AppError> =
        runtime.run(|registry| async move { Ok(registry.users.len()) }).await;
    assert_eq!(recovered.value(), Some(&0));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn panicking_work_becomes_defect() {
    let runtime = counting_runtime(Arc::new(AtomicUsize::new(0)));

    let in_task: AsyncResult<usize, AppError> = runtime
        .run(|_| async move {
            if true {
                panic!("corrupt registry");
            }
            Ok(0)
        })
        .await;
    let spawned: AsyncResult<usize, AppError> = runtime
        .spawn(|_| async move {
            if true {
                panic!("corrupt registry");
            }
            Ok(0)
        })
        .await;

    assert_eq!(in_task.defect().map(|d| d.message()), Some("corrupt registry"));
    assert_eq!(spawned.defect().map(|d| d.message()), Some("corrupt registry"));
}

#[tokio::test]
async fn spawn_runs_on_a_new_task() {
    let runtime = counting_runtime(Arc::new(AtomicUsize::new(0)));

    let result: AsyncResult<Vec<String>, AppError> = runtime
        .spawn(|registry| async move {
            Ok(registry.users.iter().map(|u| u.to_uppercase()).collect())
        })
        .await;

    assert_eq!(result.into_value(), Some(vec!["ADA".to_string(), "GRACE".to_string()]));
}

#[tokio::test]
async fn dispose_forces_a_rebuild() {
    let runs = Arc::new(AtomicUsize::new(0));
    let runtime = counting_runtime(Arc::clone(&runs));

    runtime.context().await.unwrap();
    assert!(runtime.dispose());
    assert!(!runtime.dispose());

    runtime.context().await.unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}
