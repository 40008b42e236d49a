use centsible::config::CONFIG;
use centsible::infrastructure::storage::snapshot::LedgerSnapshot;
use centsible::{InMemoryLogging, InMemoryStorage, LedgerService};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&CONFIG.log_level))
        .init();

    let limits = CONFIG.limits()?;
    let Some(path) = CONFIG.ledger_path.as_ref() else {
        error!("LEDGER_PATH is not set; nothing to report");
        std::process::exit(2);
    };

    let snapshot = LedgerSnapshot::load(path).await?;
    info!(
        "Loaded {} expenses and {} payments from {}",
        snapshot.expenses.len(),
        snapshot.payments.len(),
        path.display()
    );

    let service = LedgerService::new(InMemoryStorage::from_snapshot(snapshot), InMemoryLogging::new())
        .with_limits(limits);
    let reports = service.ledger_report().await?;

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
