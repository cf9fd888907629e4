//! Transaction domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{MAX_PRICE, MAX_QUANTITY};
use crate::errors::ValidationError;
use crate::settings::JournalSettings;
use crate::transactions::transactions_constants::{TRANSACTION_TYPE_BUY, TRANSACTION_TYPE_SELL};

/// Direction of a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Buy,
    Sell,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => TRANSACTION_TYPE_BUY,
            TransactionType::Sell => TRANSACTION_TYPE_SELL,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    /// Only the exact labels "Buy" and "Sell" are accepted.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            s if s == TRANSACTION_TYPE_BUY => Ok(TransactionType::Buy),
            s if s == TRANSACTION_TYPE_SELL => Ok(TransactionType::Sell),
            other => Err(ValidationError::UnknownTransactionType(other.to_string())),
        }
    }
}

/// Cash amounts derived from price, quantity and rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionCharges {
    /// price x quantity, negated for sells
    pub total: Decimal,
    /// |total| x fee_rate
    pub fee: Decimal,
    /// fee x vat_rate
    pub vat: Decimal,
    /// Buy: total - (fee + vat). Sell: total + (fee + vat).
    pub net_total: Decimal,
}

impl TransactionCharges {
    /// Fails with [`ValidationError::AmountOutOfRange`] when any amount is
    /// not representable.
    pub fn compute(
        transaction_type: TransactionType,
        price: Decimal,
        quantity: u64,
        fee_rate: Decimal,
        vat_rate: Decimal,
    ) -> std::result::Result<Self, ValidationError> {
        let gross = price
            .checked_mul(Decimal::from(quantity))
            .ok_or(ValidationError::AmountOutOfRange)?;
        let total = match transaction_type {
            TransactionType::Buy => gross,
            TransactionType::Sell => -gross,
        };
        Self::from_total(transaction_type, total, fee_rate, vat_rate)
    }

    /// Derives fee, VAT and net total from an already signed total.
    pub fn from_total(
        transaction_type: TransactionType,
        total: Decimal,
        fee_rate: Decimal,
        vat_rate: Decimal,
    ) -> std::result::Result<Self, ValidationError> {
        let fee = total.abs().checked_mul(fee_rate);
        let vat = fee.and_then(|fee| fee.checked_mul(vat_rate));
        let (fee, vat) = fee.zip(vat).ok_or(ValidationError::AmountOutOfRange)?;
        let charges = fee
            .checked_add(vat)
            .ok_or(ValidationError::AmountOutOfRange)?;
        let net_total = match transaction_type {
            TransactionType::Buy => total.checked_sub(charges),
            TransactionType::Sell => total.checked_add(charges),
        }
        .ok_or(ValidationError::AmountOutOfRange)?;
        Ok(Self {
            total,
            fee,
            vat,
            net_total,
        })
    }
}

/// A recorded trade. Immutable once appended to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Insertion order within the ledger; tiebreak for same-date rows
    pub sequence: u64,
    pub date: NaiveDate,
    pub ticker: String,
    pub transaction_type: TransactionType,
    pub price: Decimal,
    pub quantity: u64,
    pub total: Decimal,
    pub broker: String,
    pub fee_rate: Decimal,
    pub fee: Decimal,
    pub vat_rate: Decimal,
    pub vat: Decimal,
    pub net_total: Decimal,
    pub notes: Option<String>,
}

impl Transaction {
    /// Validates the intrinsic fields of a proposed transaction and builds the
    /// ledger row, deriving totals and applying defaults from `settings`.
    ///
    /// Quantity and price are bounded by [`MAX_QUANTITY`] and [`MAX_PRICE`],
    /// which keeps every running total over a ledger representable.
    /// Holdings-dependent checks (selling more than owned) are done by
    /// [`crate::transactions::validate_transaction`].
    pub fn from_new(
        new: &NewTransaction,
        sequence: u64,
        settings: &JournalSettings,
    ) -> std::result::Result<Self, ValidationError> {
        let transaction_type = new.transaction_type.parse::<TransactionType>()?;
        let ticker = normalize_ticker(&new.ticker);
        if ticker.is_empty() {
            return Err(ValidationError::EmptyTicker);
        }
        if new.quantity <= 0 {
            return Err(ValidationError::NonPositiveQuantity);
        }
        if new.quantity.unsigned_abs() > MAX_QUANTITY {
            return Err(ValidationError::QuantityOutOfRange { max: MAX_QUANTITY });
        }
        if new.price <= Decimal::ZERO {
            return Err(ValidationError::NonPositivePrice);
        }
        if new.price > Decimal::from(MAX_PRICE) {
            return Err(ValidationError::PriceOutOfRange { max: MAX_PRICE });
        }

        let fee_rate = new.fee_rate.unwrap_or(settings.default_fee_rate);
        let vat_rate = new.vat_rate.unwrap_or(settings.default_vat_rate);
        if fee_rate < Decimal::ZERO {
            return Err(ValidationError::NegativeRate {
                field: "Fee rate".to_string(),
            });
        }
        if vat_rate < Decimal::ZERO {
            return Err(ValidationError::NegativeRate {
                field: "VAT rate".to_string(),
            });
        }

        let quantity = new.quantity.unsigned_abs();
        let charges =
            TransactionCharges::compute(transaction_type, new.price, quantity, fee_rate, vat_rate)?;

        Ok(Transaction {
            sequence,
            date: new.date,
            ticker,
            transaction_type,
            price: new.price,
            quantity,
            total: charges.total,
            broker: settings.broker_or_default(new.broker.as_deref()),
            fee_rate,
            fee: charges.fee,
            vat_rate,
            vat: charges.vat,
            net_total: charges.net_total,
            notes: normalize_notes(new.notes.as_deref()),
        })
    }

    pub fn is_buy(&self) -> bool {
        self.transaction_type == TransactionType::Buy
    }

    pub fn is_sell(&self) -> bool {
        self.transaction_type == TransactionType::Sell
    }

    /// Quantity with its direction: positive for buys, negative for sells.
    pub fn signed_quantity(&self) -> i64 {
        let quantity = self.quantity as i64;
        match self.transaction_type {
            TransactionType::Buy => quantity,
            TransactionType::Sell => -quantity,
        }
    }
}

/// Input model for proposing a new transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub ticker: String,
    /// "Buy" or "Sell"
    pub transaction_type: String,
    pub price: Decimal,
    /// Kept signed so that non-positive input can be reported rather than rejected by the parser
    pub quantity: i64,
    #[serde(default)]
    pub broker: Option<String>,
    #[serde(default)]
    pub fee_rate: Option<Decimal>,
    #[serde(default)]
    pub vat_rate: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewTransaction {
    pub fn new(
        date: NaiveDate,
        ticker: &str,
        transaction_type: TransactionType,
        price: Decimal,
        quantity: i64,
    ) -> Self {
        Self {
            date,
            ticker: ticker.to_string(),
            transaction_type: transaction_type.as_str().to_string(),
            price,
            quantity,
            broker: None,
            fee_rate: None,
            vat_rate: None,
            notes: None,
        }
    }

    pub fn with_rates(mut self, fee_rate: Decimal, vat_rate: Decimal) -> Self {
        self.fee_rate = Some(fee_rate);
        self.vat_rate = Some(vat_rate);
        self
    }

    pub fn with_broker(mut self, broker: &str) -> Self {
        self.broker = Some(broker.to_string());
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// Ticker as it will be stored.
    pub fn normalized_ticker(&self) -> String {
        normalize_ticker(&self.ticker)
    }
}

pub(crate) fn normalize_ticker(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

pub(crate) fn normalize_notes(notes: Option<&str>) -> Option<String> {
    notes
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}
