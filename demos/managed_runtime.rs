//! Managed runtime example
//!
//! Run with: cargo run --example managed_runtime --features async-tokio

use std::collections::HashMap;
use std::time::Duration;

use outcome_rail::async_ext::ManagedRuntime;
use outcome_rail::prelude::*;

tagged_error! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum AppError {
        Startup(String),
        NotFound { id: u64 },
    }
}

impl From<String> for AppError {
    fn from(message: String) -> Self {
        AppError::Startup(message)
    }
}

struct Directory {
    users: HashMap<u64, &'static str>,
}

async fn connect() -> Result<Directory, String> {
    tokio::time::sleep(Duration::from_millis(50)).await;
    println!("(directory connected)");
    Ok(Directory { users: HashMap::from([(1, "ada"), (2, "grace")]) })
}

async fn lookup(
    runtime: &ManagedRuntime<Directory, String>,
    id: u64,
) -> AsyncResult<&'static str, AppError> {
    runtime
        .run(|dir| async move { dir.users.get(&id).copied().ok_or(AppError::NotFound { id }) })
        .await
}

#[tokio::main]
async fn main() {
    let runtime = ManagedRuntime::new(connect);

    // Concurrent callers share one connection attempt.
    let (a, b, c) = tokio::join!(lookup(&runtime, 1), lookup(&runtime, 2), lookup(&runtime, 3));
    for result in [a, b, c] {
        let line = result
            .builder()
            .on_success(|name, _| format!("found {}", name))
            .on_error_tag("NotFound", |e, _| format!("no user: {:?}", e))
            .on_failure(|cause, _| format!("failed: {:?}", cause))
            .or_else(String::new);
        println!("{}", line);
    }

    // A panic inside the unit of work becomes a defect instead of unwinding.
    let crashed: AsyncResult<(), AppError> = runtime
        .spawn(|_| async move {
            if true {
                panic!("directory index corrupted");
            }
            Ok(())
        })
        .await;
    println!("crashed: {:?}", crashed.defect());

    runtime.dispose();
    println!("initialized after dispose: {}", runtime.is_initialized());
}
