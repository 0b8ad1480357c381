//! Recurring expense job: a single run or a fixed-interval loop.

use tokio::time::{interval, Duration};
use tracing::{error, info};

use money_diary_core::LedgerConfig;

use crate::config::Config;
use crate::main_lib::build_context;

/// Materializes due recurring expenses for the current month and persists
/// the result. Expenses created before a failure are saved too.
pub async fn run_recurring_job(
    config: &Config,
    ledger_config: &LedgerConfig,
) -> anyhow::Result<usize> {
    let context = build_context(config, ledger_config)?;
    let outcome = context.ledger.process_recurring(&config.acting_user).await;
    context.persist(config).await?;

    let created = outcome?;
    info!("Recurring job finished: {} expense(s) created", created);
    Ok(created)
}

/// Runs the job every `every` until Ctrl-C. Failed runs are logged and the
/// loop continues.
pub async fn run_recurring_every(config: &Config, ledger_config: &LedgerConfig, every: Duration) {
    info!("Recurring scheduler started ({}s interval)", every.as_secs());
    let mut ticker = interval(every);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = run_recurring_job(config, ledger_config).await {
                    error!("Scheduled recurring run failed: {:#}", e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Recurring scheduler stopping");
                break;
            }
        }
    }
}
