//! In-process trigger loop for a workflow definition

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{info, instrument};

use crate::runner::{run_task, RunOutcome};
use crate::workflow::WorkflowDefinition;

/// Outcome of every task in one scheduled run
#[derive(Debug, Clone)]
pub struct WorkflowRun {
    pub logical_date: DateTime<Utc>,
    pub outcomes: Vec<(String, RunOutcome)>,
}

impl WorkflowRun {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|(_, o)| o.is_success())
    }
}

/// Fires a workflow's tasks on its schedule.
///
/// Runs never overlap: the next fire time is only awaited once the current
/// run (including retries) has finished. A run that overshoots fire times
/// is followed by one immediate run for the latest of them; without
/// catchup the earlier ones are skipped.
pub struct Scheduler {
    definition: Arc<WorkflowDefinition>,
}

impl Scheduler {
    pub fn new(definition: WorkflowDefinition) -> Self {
        Self {
            definition: Arc::new(definition),
        }
    }

    pub fn definition(&self) -> &WorkflowDefinition {
        &self.definition
    }

    /// Run every task once, in registration order
    #[instrument(skip(self), fields(workflow_id = %self.definition.workflow_id))]
    pub async fn run_once(&self, logical_date: DateTime<Utc>) -> WorkflowRun {
        let mut outcomes = Vec::with_capacity(self.definition.tasks().len());
        for task in self.definition.tasks() {
            let outcome = run_task(task).await;
            outcomes.push((task.task_id.clone(), outcome));
        }

        let run = WorkflowRun {
            logical_date,
            outcomes,
        };
        info!(success = run.is_success(), "workflow run finished");
        run
    }

    /// Loop until `shutdown` flips to `true`. Returns the number of runs
    /// started.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> usize {
        let schedule = &self.definition.schedule;
        let mut next = schedule.first_fire(Utc::now());
        let mut runs = 0;

        loop {
            if *shutdown.borrow() {
                break;
            }

            let wait = (next - Utc::now()).to_std().unwrap_or(Duration::ZERO);
            info!(
                workflow_id = %self.definition.workflow_id,
                next_fire = %next,
                "waiting for next run"
            );

            tokio::select! {
                _ = tokio::time::sleep(wait) => {
                    self.run_once(schedule.logical_date(next)).await;
                    runs += 1;
                    next = schedule.fire_after_run(next, Utc::now());
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!(runs, "scheduler stopped");
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::RetryPolicy;
    use crate::task::{FnTask, Task, TaskError};
    use crate::workflow::DefaultArgs;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::sync::mpsc;

    fn workflow(now: DateTime<Utc>) -> WorkflowDefinition {
        let args = DefaultArgs::new("ops", now - chrono::Duration::days(1));
        WorkflowDefinition::new("wf", args, chrono::Duration::days(1), false).unwrap()
    }

    #[test_log::test(tokio::test)]
    async fn test_run_once_runs_tasks_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut wf = workflow(Utc::now());
        for id in ["first", "second"] {
            let tx = tx.clone();
            wf.add_task(id, FnTask(move || {
                tx.send(id).map_err(|e| TaskError::new(e.to_string()))
            }))
            .unwrap();
        }

        let run = Scheduler::new(wf).run_once(Utc::now()).await;

        assert!(run.is_success());
        assert_eq!(rx.recv().await, Some("first"));
        assert_eq!(rx.recv().await, Some("second"));
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn test_failed_task_does_not_stop_later_tasks() {
        let mut wf = workflow(Utc::now());
        wf.add_task_definition(
            crate::task::TaskDefinition::new("broken", FnTask(|| Err(TaskError::new("nope"))))
                .with_retry_policy(RetryPolicy::fixed(1, Duration::from_secs(300))),
        )
        .unwrap();
        wf.add_task("fine", FnTask(|| Ok(()))).unwrap();

        let run = Scheduler::new(wf).run_once(Utc::now()).await;

        assert!(!run.is_success());
        assert_eq!(run.outcomes[0].1.attempts(), 2);
        assert!(run.outcomes[1].1.is_success());
    }

    #[test_log::test(tokio::test)]
    async fn test_loop_fires_immediately_then_stops_on_shutdown() {
        let (fired_tx, mut fired_rx) = mpsc::unbounded_channel();
        let mut wf = workflow(Utc::now());
        wf.add_task("ping", FnTask(move || {
            fired_tx.send(()).map_err(|e| TaskError::new(e.to_string()))
        }))
        .unwrap();

        let scheduler = Scheduler::new(wf);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move { scheduler.run(shutdown_rx).await });

        fired_rx.recv().await.unwrap();
        shutdown_tx.send(true).unwrap();

        let runs = handle.await.unwrap();
        assert_eq!(runs, 1);
    }

    #[test_log::test(tokio::test)]
    async fn test_loop_exits_when_already_shut_down() {
        let scheduler = Scheduler::new(workflow(Utc::now()));
        let (_tx, rx) = watch::channel(true);

        assert_eq!(scheduler.run(rx).await, 0);
    }

    /// Sleeps through several fire times on its first call only
    struct SlowFirstRun {
        calls: Arc<AtomicU32>,
        first_run: Duration,
    }

    #[async_trait]
    impl Task for SlowFirstRun {
        async fn run(&self) -> Result<(), TaskError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                tokio::time::sleep(self.first_run).await;
            }
            Ok(())
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_overrun_without_catchup_does_not_replay_missed_runs() {
        let now = Utc::now();
        let interval = chrono::Duration::milliseconds(100);
        let args = DefaultArgs::new("ops", now - interval);
        let mut wf = WorkflowDefinition::new("wf", args, interval, false).unwrap();

        let calls = Arc::new(AtomicU32::new(0));
        wf.add_task(
            "slow",
            SlowFirstRun {
                calls: calls.clone(),
                first_run: Duration::from_millis(550),
            },
        )
        .unwrap();

        let scheduler = Scheduler::new(wf);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move { scheduler.run(shutdown_rx).await });

        tokio::time::sleep(Duration::from_millis(620)).await;
        shutdown_tx.send(true).unwrap();
        let runs = handle.await.unwrap();

        // First run, one run for the latest missed fire time, maybe the
        // 600 ms fire time. Replaying every missed interval would give 7.
        assert!(runs >= 2, "expected a run after the overrun, got {runs}");
        assert!(runs <= 3, "missed intervals were replayed: {runs} runs");
        assert_eq!(calls.load(Ordering::SeqCst) as usize, runs);
    }
}
