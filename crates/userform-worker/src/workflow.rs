//! Workflow definitions
//!
//! A workflow is a named container of tasks sharing one schedule. Per-task
//! settings fall back to the workflow's [`DefaultArgs`].

use chrono::{DateTime, Duration, Utc};

use crate::retry::RetryPolicy;
use crate::schedule::Schedule;
use crate::task::{Task, TaskDefinition};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("duplicate task id {0:?} in workflow {1:?}")]
    DuplicateTask(String, String),

    #[error("schedule interval must be positive")]
    InvalidInterval,
}

/// Settings every task of a workflow inherits
#[derive(Debug, Clone)]
pub struct DefaultArgs {
    pub owner: String,
    pub depends_on_past: bool,
    pub start_date: DateTime<Utc>,
    pub email_on_failure: bool,
    pub email_on_retry: bool,
    pub retry_policy: RetryPolicy,
}

impl DefaultArgs {
    pub fn new(owner: impl Into<String>, start_date: DateTime<Utc>) -> Self {
        Self {
            owner: owner.into(),
            depends_on_past: false,
            start_date,
            email_on_failure: false,
            email_on_retry: false,
            retry_policy: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }
}

#[derive(Debug, Clone)]
pub struct WorkflowDefinition {
    pub workflow_id: String,
    pub description: Option<String>,
    pub default_args: DefaultArgs,
    pub schedule: Schedule,
    tasks: Vec<TaskDefinition>,
}

impl WorkflowDefinition {
    /// Create a workflow firing every `interval` from `default_args.start_date`
    pub fn new(
        workflow_id: impl Into<String>,
        default_args: DefaultArgs,
        interval: Duration,
        catchup: bool,
    ) -> Result<Self, DefinitionError> {
        if interval <= Duration::zero() {
            return Err(DefinitionError::InvalidInterval);
        }

        Ok(Self {
            workflow_id: workflow_id.into(),
            description: None,
            schedule: Schedule::new(default_args.start_date, interval, catchup),
            default_args,
            tasks: Vec::new(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Register a task using the workflow's default retry policy
    pub fn add_task(
        &mut self,
        task_id: impl Into<String>,
        task: impl Task + 'static,
    ) -> Result<&TaskDefinition, DefinitionError> {
        let definition = TaskDefinition::new(task_id, task)
            .with_retry_policy(self.default_args.retry_policy.clone());
        self.add_task_definition(definition)
    }

    /// Register a fully specified task
    pub fn add_task_definition(
        &mut self,
        definition: TaskDefinition,
    ) -> Result<&TaskDefinition, DefinitionError> {
        if self.task(&definition.task_id).is_some() {
            return Err(DefinitionError::DuplicateTask(
                definition.task_id,
                self.workflow_id.clone(),
            ));
        }

        self.tasks.push(definition);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    pub fn task(&self, task_id: &str) -> Option<&TaskDefinition> {
        self.tasks.iter().find(|t| t.task_id == task_id)
    }

    /// Tasks in registration order
    pub fn tasks(&self) -> &[TaskDefinition] {
        &self.tasks
    }
}
