//! Remote task execution: one `GET /api/task/{id}` per trigger.

mod client;

pub use client::{FailureKind, TaskClient, TaskError, TaskRunner, DEFAULT_TIMEOUT};
