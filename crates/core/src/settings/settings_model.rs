use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::{DEFAULT_BROKER, DEFAULT_FEE_RATE, DEFAULT_VAT_RATE, KNOWN_BROKERS};

/// Defaults used by the transaction builder and the CSV loaders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalSettings {
    /// Commission rate applied when a transaction does not carry one
    pub default_fee_rate: Decimal,
    /// VAT rate on the commission applied when a transaction does not carry one
    pub default_vat_rate: Decimal,
    /// Broker labels accepted verbatim by the bulk importer
    pub brokers: Vec<String>,
    /// Label used for missing or unrecognised brokers
    pub default_broker: String,
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            default_fee_rate: Decimal::from_str(DEFAULT_FEE_RATE).unwrap_or(Decimal::ZERO),
            default_vat_rate: Decimal::from_str(DEFAULT_VAT_RATE).unwrap_or(Decimal::ZERO),
            brokers: KNOWN_BROKERS.iter().map(|b| b.to_string()).collect(),
            default_broker: DEFAULT_BROKER.to_string(),
        }
    }
}

impl JournalSettings {
    pub fn with_rates(default_fee_rate: Decimal, default_vat_rate: Decimal) -> Self {
        Self {
            default_fee_rate,
            default_vat_rate,
            ..Default::default()
        }
    }

    /// Returns the broker label unchanged if known, otherwise the default broker.
    pub fn normalize_broker(&self, broker: Option<&str>) -> String {
        match broker.map(str::trim) {
            Some(b) if self.brokers.iter().any(|known| known == b) => b.to_string(),
            _ => self.default_broker.clone(),
        }
    }

    /// Returns the trimmed broker label, or the default broker when blank.
    pub fn broker_or_default(&self, broker: Option<&str>) -> String {
        match broker.map(str::trim) {
            Some(b) if !b.is_empty() => b.to_string(),
            _ => self.default_broker.clone(),
        }
    }
}
