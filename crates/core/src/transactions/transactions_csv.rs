//! CSV import, restore and export of ledger rows.
//!
//! Import reads a user-authored file of proposed trades. Restore reads a
//! previously exported ledger and keeps its stored amounts. Both reject the
//! whole file on structural errors.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use csv::WriterBuilder;
use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::csv_parser::{parse_csv, CsvRow, ParsedCsv};
use super::transactions_constants::*;
use super::transactions_model::{NewTransaction, Transaction, TransactionCharges, TransactionType};
use crate::constants::MAX_PRICE;
use crate::errors::{Error, ImportError, Result, ValidationError};
use crate::settings::JournalSettings;

const IMPORT_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Column positions resolved from the header row.
struct Columns {
    date: Option<usize>,
    ticker: Option<usize>,
    transaction_type: Option<usize>,
    price: Option<usize>,
    quantity: Option<usize>,
    total: Option<usize>,
    broker: Option<usize>,
    fee_rate: Option<usize>,
    fee: Option<usize>,
    vat_rate: Option<usize>,
    vat: Option<usize>,
    net_total: Option<usize>,
    notes: Option<usize>,
}

impl Columns {
    fn resolve(parsed: &ParsedCsv, required: &[&str]) -> Result<Self> {
        let missing = parsed.missing_columns(required);
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing).into());
        }
        Ok(Self {
            date: parsed.column_index(COLUMN_DATE),
            ticker: parsed.column_index(COLUMN_TICKER),
            transaction_type: parsed.column_index(COLUMN_TRANSACTION_TYPE),
            price: parsed.column_index(COLUMN_PRICE),
            quantity: parsed.column_index(COLUMN_QUANTITY),
            total: parsed.column_index(COLUMN_TOTAL),
            broker: parsed.column_index(COLUMN_BROKER),
            fee_rate: parsed.column_index(COLUMN_FEE_RATE),
            fee: parsed.column_index(COLUMN_FEE),
            vat_rate: parsed.column_index(COLUMN_VAT_RATE),
            vat: parsed.column_index(COLUMN_VAT),
            net_total: parsed.column_index(COLUMN_NET_TOTAL),
            notes: parsed.column_index(COLUMN_NOTES),
        })
    }
}

/// Parses a bulk import file into proposed transactions.
///
/// Structural problems reject the file: missing required columns, an
/// unparseable date, a transaction type other than exactly "Buy" or "Sell",
/// or a malformed number. Row-level accounting checks (empty ticker,
/// non-positive quantity, overselling) are left to batch validation.
/// Unknown broker labels become the default broker.
pub fn parse_import(content: &[u8], settings: &JournalSettings) -> Result<Vec<NewTransaction>> {
    let parsed = parse_csv(content)?;
    let columns = Columns::resolve(&parsed, &REQUIRED_IMPORT_COLUMNS)?;
    debug!("Parsing {} import rows", parsed.rows.len());

    let mut invalid_types: Vec<String> = Vec::new();
    let mut proposed = Vec::with_capacity(parsed.rows.len());

    for row in &parsed.rows {
        let date = parse_date_cell(row, columns.date)?;
        let transaction_type = exact_cell(row, columns.transaction_type);
        if TransactionType::from_str(&transaction_type).is_err()
            && !invalid_types.contains(&transaction_type)
        {
            invalid_types.push(transaction_type.clone());
        }

        proposed.push(NewTransaction {
            date,
            ticker: raw_cell(row, columns.ticker),
            transaction_type,
            price: parse_decimal_cell(row, columns.price, COLUMN_PRICE)?,
            quantity: parse_quantity_cell(row, columns.quantity)?,
            broker: Some(settings.normalize_broker(row.cell(columns.broker))),
            fee_rate: parse_optional_decimal(row, columns.fee_rate, COLUMN_FEE_RATE)?,
            vat_rate: parse_optional_decimal(row, columns.vat_rate, COLUMN_VAT_RATE)?,
            notes: row.cell(columns.notes).map(str::to_string),
        });
    }

    if !invalid_types.is_empty() {
        return Err(ImportError::InvalidTransactionType(invalid_types).into());
    }
    Ok(proposed)
}

/// Parses an exported ledger back into ledger rows.
///
/// Stored `Total`, `Fee`, `VAT` and `Net Total` values are kept as written;
/// the charges are derived from `Total` when those columns are absent. Broker
/// labels are kept verbatim. Sequence numbers follow file order.
///
/// Holdings are not checked, but each row must satisfy the same quantity and
/// price bounds as a new transaction, and `|Total|` may not exceed
/// `MAX_PRICE x Quantity`.
pub fn parse_restore(content: &[u8], settings: &JournalSettings) -> Result<Vec<Transaction>> {
    let parsed = parse_csv(content)?;
    let columns = Columns::resolve(&parsed, &REQUIRED_RESTORE_COLUMNS)?;
    debug!("Parsing {} restore rows", parsed.rows.len());

    let mut invalid_types: Vec<String> = Vec::new();
    let mut restored = Vec::with_capacity(parsed.rows.len());

    for (sequence, row) in parsed.rows.iter().enumerate() {
        let date = parse_date_cell(row, columns.date)?;
        let transaction_type = exact_cell(row, columns.transaction_type);
        if TransactionType::from_str(&transaction_type).is_err() {
            if !invalid_types.contains(&transaction_type) {
                invalid_types.push(transaction_type);
            }
            continue;
        }

        let new = NewTransaction {
            date,
            ticker: raw_cell(row, columns.ticker),
            transaction_type,
            price: parse_decimal_cell(row, columns.price, COLUMN_PRICE)?,
            quantity: parse_quantity_cell(row, columns.quantity)?,
            broker: row.cell(columns.broker).map(str::to_string),
            fee_rate: parse_optional_decimal(row, columns.fee_rate, COLUMN_FEE_RATE)?,
            vat_rate: parse_optional_decimal(row, columns.vat_rate, COLUMN_VAT_RATE)?,
            notes: row.cell(columns.notes).map(str::to_string),
        };
        let invalid_row = |e: ValidationError| ImportError::InvalidRow {
            row: row.row,
            reason: e.to_string(),
        };
        let mut transaction =
            Transaction::from_new(&new, sequence as u64, settings).map_err(invalid_row)?;

        let total = parse_decimal_cell(row, columns.total, COLUMN_TOTAL)?;
        let max_total = Decimal::from(MAX_PRICE) * Decimal::from(transaction.quantity);
        if total.abs() > max_total {
            return Err(invalid_row(ValidationError::AmountOutOfRange).into());
        }
        let derived = TransactionCharges::from_total(
            transaction.transaction_type,
            total,
            transaction.fee_rate,
            transaction.vat_rate,
        )
        .map_err(invalid_row)?;
        transaction.total = total;
        transaction.fee =
            parse_optional_decimal(row, columns.fee, COLUMN_FEE)?.unwrap_or(derived.fee);
        transaction.vat =
            parse_optional_decimal(row, columns.vat, COLUMN_VAT)?.unwrap_or(derived.vat);
        transaction.net_total =
            parse_optional_decimal(row, columns.net_total, COLUMN_NET_TOTAL)?
                .unwrap_or(derived.net_total);
        restored.push(transaction);
    }

    if !invalid_types.is_empty() {
        return Err(ImportError::InvalidTransactionType(invalid_types).into());
    }
    Ok(restored)
}

/// Writes the ledger as CSV in insertion order, one column per stored field.
pub fn export_transactions_csv(transactions: &[Transaction]) -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record([
        COLUMN_DATE,
        COLUMN_TICKER,
        COLUMN_TRANSACTION_TYPE,
        COLUMN_PRICE,
        COLUMN_QUANTITY,
        COLUMN_TOTAL,
        COLUMN_BROKER,
        COLUMN_FEE_RATE,
        COLUMN_FEE,
        COLUMN_VAT_RATE,
        COLUMN_VAT,
        COLUMN_NET_TOTAL,
        COLUMN_NOTES,
    ])?;

    for t in transactions {
        writer.write_record([
            t.date.format(EXPORT_DATE_FORMAT).to_string(),
            t.ticker.clone(),
            t.transaction_type.as_str().to_string(),
            t.price.to_string(),
            t.quantity.to_string(),
            t.total.to_string(),
            t.broker.clone(),
            t.fee_rate.to_string(),
            t.fee.to_string(),
            t.vat_rate.to_string(),
            t.vat.to_string(),
            t.net_total.to_string(),
            t.notes.clone().unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Unexpected(format!("Failed to flush CSV writer: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| Error::Unexpected(e.to_string()))
}

/// Parses a calendar date in any accepted import format.
pub fn parse_import_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    IMPORT_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            IMPORT_DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|dt| dt.date())
        })
}

/// Cell without trimming, for values that must match exactly.
fn exact_cell(row: &CsvRow, index: Option<usize>) -> String {
    index
        .and_then(|i| row.cells.get(i))
        .cloned()
        .unwrap_or_default()
}

fn raw_cell(row: &CsvRow, index: Option<usize>) -> String {
    row.cell(index).unwrap_or_default().to_string()
}

fn parse_date_cell(row: &CsvRow, index: Option<usize>) -> Result<NaiveDate> {
    let value = raw_cell(row, index);
    parse_import_date(&value).ok_or_else(|| {
        ImportError::InvalidDate {
            row: row.row,
            value,
        }
        .into()
    })
}

fn parse_decimal_cell(row: &CsvRow, index: Option<usize>, column: &str) -> Result<Decimal> {
    let value = raw_cell(row, index);
    Decimal::from_str(&value)
        .or_else(|_| Decimal::from_scientific(&value))
        .map_err(|_| invalid_number(row, column, value))
}

fn parse_optional_decimal(
    row: &CsvRow,
    index: Option<usize>,
    column: &str,
) -> Result<Option<Decimal>> {
    match row.cell(index) {
        Some(_) => parse_decimal_cell(row, index, column).map(Some),
        None => Ok(None),
    }
}

/// Whole share counts; "10.0" is accepted, "10.5" is not.
fn parse_quantity_cell(row: &CsvRow, index: Option<usize>) -> Result<i64> {
    let value = raw_cell(row, index);
    Decimal::from_str(&value)
        .ok()
        .filter(|q| q.fract().is_zero())
        .and_then(|q| q.to_i64())
        .ok_or_else(|| invalid_number(row, COLUMN_QUANTITY, value))
}

fn invalid_number(row: &CsvRow, column: &str, value: String) -> Error {
    ImportError::InvalidNumber {
        row: row.row,
        column: column.to_string(),
        value,
    }
    .into()
}
