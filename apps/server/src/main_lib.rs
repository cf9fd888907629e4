use std::sync::Arc;

use stockjournal_core::ledger::{ImportMode, LedgerService, LedgerServiceTrait};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub ledger_service: Arc<dyn LedgerServiceTrait>,
}

/// Installs the global subscriber. `log` records from the core are bridged
/// into tracing by `init`.
pub fn init_tracing() {
    let log_format = std::env::var("SJ_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let ledger_service = LedgerService::new(config.journal_settings());

    if let Some(path) = &config.ledger_path {
        match tokio::fs::read(path).await {
            Ok(content) => {
                let restored = ledger_service
                    .restore_csv(&content, ImportMode::Replace)
                    .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", path.display(), e))?;
                tracing::info!(
                    "Loaded {} transactions from {}",
                    restored.restored,
                    path.display()
                );
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Ledger file {} not found, starting empty", path.display());
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(Arc::new(AppState {
        ledger_service: Arc::new(ledger_service),
    }))
}
