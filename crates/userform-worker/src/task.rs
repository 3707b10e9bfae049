//! Task trait and task definitions

use std::sync::Arc;

use async_trait::async_trait;

use crate::retry::RetryPolicy;

/// Error raised by a task body
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TaskError {
    pub message: String,
}

impl TaskError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A zero-argument unit of work triggered by the scheduler.
///
/// Tasks take no input and their only observable result is success or
/// failure; anything else they do is a side effect.
#[async_trait]
pub trait Task: Send + Sync {
    async fn run(&self) -> Result<(), TaskError>;
}

/// Adapts a plain closure into a [`Task`]
pub struct FnTask<F>(pub F);

#[async_trait]
impl<F> Task for FnTask<F>
where
    F: Fn() -> Result<(), TaskError> + Send + Sync,
{
    async fn run(&self) -> Result<(), TaskError> {
        (self.0)()
    }
}

/// A task registered under an id inside a workflow
#[derive(Clone)]
pub struct TaskDefinition {
    pub task_id: String,
    pub retry_policy: RetryPolicy,
    task: Arc<dyn Task>,
}

impl TaskDefinition {
    pub fn new(task_id: impl Into<String>, task: impl Task + 'static) -> Self {
        Self {
            task_id: task_id.into(),
            retry_policy: RetryPolicy::default(),
            task: Arc::new(task),
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn task(&self) -> &dyn Task {
        self.task.as_ref()
    }
}

impl std::fmt::Debug for TaskDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskDefinition")
            .field("task_id", &self.task_id)
            .field("retry_policy", &self.retry_policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fn_task() {
        let ok = FnTask(|| Ok(()));
        assert!(ok.run().await.is_ok());

        let failing = FnTask(|| Err(TaskError::new("boom")));
        assert_eq!(failing.run().await.unwrap_err().to_string(), "boom");
    }

    #[test]
    fn test_definition_defaults_to_no_retry() {
        let def = TaskDefinition::new("noop", FnTask(|| Ok(())));
        assert_eq!(def.retry_policy, RetryPolicy::no_retry());
        assert!(format!("{def:?}").contains("noop"));
    }
}
