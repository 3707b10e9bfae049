// The daily hello workflow
// Decision: start date is one day before the definition is built, so the
// first run fires as soon as the worker starts

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::retry::RetryPolicy;
use crate::task::{Task, TaskError};
use crate::workflow::{DefaultArgs, DefinitionError, WorkflowDefinition};

pub const WORKFLOW_ID: &str = "first_dag";
pub const TASK_ID: &str = "print_hello";
pub const HELLO_MESSAGE: &str = "Hello, Airflow!";

/// Logs the fixed greeting
pub struct PrintHello;

#[async_trait]
impl Task for PrintHello {
    async fn run(&self) -> Result<(), TaskError> {
        tracing::info!("{}", HELLO_MESSAGE);
        Ok(())
    }
}

/// One retry after five minutes, no alerting
pub fn retry_policy() -> RetryPolicy {
    RetryPolicy::fixed(1, std::time::Duration::from_secs(5 * 60))
}

/// Build the `first_dag` definition as of `now`
pub fn first_dag(now: DateTime<Utc>) -> Result<WorkflowDefinition, DefinitionError> {
    let default_args =
        DefaultArgs::new("airflow", now - Duration::days(1)).with_retry_policy(retry_policy());

    let mut workflow = WorkflowDefinition::new(WORKFLOW_ID, default_args, Duration::days(1), false)?
        .with_description("My first DAG");
    workflow.add_task(TASK_ID, PrintHello)?;

    Ok(workflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_dag_shape() {
        let now = Utc::now();
        let dag = first_dag(now).unwrap();

        assert_eq!(dag.workflow_id, "first_dag");
        assert_eq!(dag.schedule.interval, Duration::days(1));
        assert!(!dag.schedule.catchup);
        assert_eq!(dag.default_args.start_date, now - Duration::days(1));
        assert!(!dag.default_args.depends_on_past);
        assert!(!dag.default_args.email_on_failure);
        assert!(!dag.default_args.email_on_retry);

        assert_eq!(dag.tasks().len(), 1);
        let task = dag.task("print_hello").unwrap();
        assert_eq!(task.retry_policy.retries, 1);
        assert_eq!(
            task.retry_policy.retry_delay,
            std::time::Duration::from_secs(300)
        );
    }

    #[test]
    fn test_first_run_fires_at_startup() {
        let now = Utc::now();
        let dag = first_dag(now).unwrap();
        assert_eq!(dag.schedule.first_fire(now), now);
    }

    #[test_log::test(tokio::test)]
    async fn test_print_hello_succeeds() {
        assert!(PrintHello.run().await.is_ok());
    }
}
