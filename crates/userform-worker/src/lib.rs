//! # Userform worker
//!
//! Workflow definitions and the loop that triggers them.
//!
//! - [`WorkflowDefinition`]: named container of tasks sharing a [`Schedule`]
//! - [`Task`]: zero-argument unit of work, run under a [`RetryPolicy`]
//! - [`Scheduler`]: fires the tasks of one definition on its schedule
//!
//! The only workflow shipped is [`first_dag()`], whose single task logs a
//! greeting once a day.

pub mod config;
pub mod first_dag;
pub mod retry;
pub mod runner;
pub mod schedule;
pub mod scheduler;
pub mod task;
pub mod workflow;

pub use config::WorkerConfig;
pub use first_dag::first_dag;
pub use retry::RetryPolicy;
pub use runner::{run_task, RunOutcome};
pub use schedule::Schedule;
pub use scheduler::{Scheduler, WorkflowRun};
pub use task::{FnTask, Task, TaskDefinition, TaskError};
pub use workflow::{DefaultArgs, DefinitionError, WorkflowDefinition};
