mod config;
mod main_lib;
mod scheduler;

use config::Config;
use main_lib::init_tracing;
use money_diary_core::LedgerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let config = Config::from_env()?;
    let ledger_config = LedgerConfig::from_env()?;
    tracing::info!("Snapshot path in use: {}", config.snapshot_path.display());

    match config.interval {
        Some(every) => scheduler::run_recurring_every(&config, &ledger_config, every).await,
        None => {
            scheduler::run_recurring_job(&config, &ledger_config).await?;
        }
    }
    Ok(())
}
