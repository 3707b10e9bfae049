//! Executes one task under its retry policy

use tracing::{error, info, instrument, warn};

use crate::task::{TaskDefinition, TaskError};

/// Result of one scheduled run of a task, after any retries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Succeeded { attempts: u32 },
    Failed { attempts: u32, error: TaskError },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Succeeded { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            RunOutcome::Succeeded { attempts } | RunOutcome::Failed { attempts, .. } => *attempts,
        }
    }
}

/// Run `definition` until it succeeds or its retry policy is exhausted.
///
/// Failures after the last attempt are logged and returned; nobody is
/// alerted.
#[instrument(skip(definition), fields(task_id = %definition.task_id))]
pub async fn run_task(definition: &TaskDefinition) -> RunOutcome {
    let policy = &definition.retry_policy;
    let mut attempt = 1;

    loop {
        match definition.task().run().await {
            Ok(()) => {
                info!(attempt, "task succeeded");
                return RunOutcome::Succeeded { attempts: attempt };
            }
            Err(e) if policy.has_attempts_remaining(attempt) => {
                let delay = policy.delay_for_attempt(attempt + 1);
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts(),
                    delay_secs = delay.as_secs(),
                    error = %e,
                    "task failed, will retry"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                error!(attempt, error = %e, "task failed, retries exhausted");
                return RunOutcome::Failed {
                    attempts: attempt,
                    error: e,
                };
            }
        }
    }
}
