use anyhow::{bail, Context, Result};
use chrono::Utc;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use userform_worker::{first_dag, Scheduler, WorkerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "userform_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("userform-worker starting...");

    let config = WorkerConfig::from_env()?;
    let definition = first_dag(Utc::now()).context("Failed to build workflow definition")?;
    tracing::info!(
        workflow_id = %definition.workflow_id,
        tasks = definition.tasks().len(),
        start_date = %definition.default_args.start_date,
        catchup = definition.schedule.catchup,
        "Workflow registered"
    );

    let scheduler = Scheduler::new(definition);

    if config.run_once {
        let run = scheduler.run_once(Utc::now()).await;
        if !run.is_success() {
            bail!("workflow run failed");
        }
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
        }
        let _ = shutdown_tx.send(true);
    });

    scheduler.run(shutdown_rx).await;

    tracing::info!("Worker shutdown complete");
    Ok(())
}
