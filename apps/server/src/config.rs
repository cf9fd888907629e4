use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use anyhow::{anyhow, Context};
use rust_decimal::Decimal;
use stockjournal_core::settings::JournalSettings;

pub struct Config {
    pub listen_addr: SocketAddr,
    /// CSV ledger restored at startup, if set
    pub ledger_path: Option<PathBuf>,
    pub default_fee_rate: Decimal,
    pub default_vat_rate: Decimal,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = JournalSettings::default();

        let listen_addr: SocketAddr = env_or("SJ_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid SJ_LISTEN_ADDR")?;
        let ledger_path = std::env::var("SJ_LEDGER_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let default_fee_rate = parse_rate("SJ_DEFAULT_FEE_RATE", defaults.default_fee_rate)?;
        let default_vat_rate = parse_rate("SJ_DEFAULT_VAT_RATE", defaults.default_vat_rate)?;
        let cors_allow = env_or("SJ_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_or("SJ_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .context("Invalid SJ_REQUEST_TIMEOUT_MS")?;

        Ok(Self {
            listen_addr,
            ledger_path,
            default_fee_rate,
            default_vat_rate,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }

    /// Defaults for every setting, ignoring the environment.
    pub fn with_defaults() -> Self {
        let defaults = JournalSettings::default();
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            ledger_path: None,
            default_fee_rate: defaults.default_fee_rate,
            default_vat_rate: defaults.default_vat_rate,
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30000),
        }
    }

    pub fn journal_settings(&self) -> JournalSettings {
        JournalSettings::with_rates(self.default_fee_rate, self.default_vat_rate)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_rate(key: &str, default: Decimal) -> anyhow::Result<Decimal> {
    match std::env::var(key) {
        Ok(value) => {
            let rate = Decimal::from_str(value.trim())
                .with_context(|| format!("Invalid {}: '{}'", key, value))?;
            if rate < Decimal::ZERO {
                return Err(anyhow!("{} must not be negative", key));
            }
            Ok(rate)
        }
        Err(_) => Ok(default),
    }
}
