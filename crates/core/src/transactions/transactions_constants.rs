//! Transaction types and CSV column names.
//!
//! A journal only records trades. Cash movements, dividends and corporate
//! actions are not modelled.

/// Purchase of shares. Quantity is added to the position.
pub const TRANSACTION_TYPE_BUY: &str = "Buy";

/// Disposal of shares. Quantity is removed from the position.
pub const TRANSACTION_TYPE_SELL: &str = "Sell";

/// CSV column names, in export order.
pub const COLUMN_DATE: &str = "Date";
pub const COLUMN_TICKER: &str = "Ticker";
pub const COLUMN_TRANSACTION_TYPE: &str = "Transaction Type";
pub const COLUMN_PRICE: &str = "Price";
pub const COLUMN_QUANTITY: &str = "Quantity";
pub const COLUMN_TOTAL: &str = "Total";
pub const COLUMN_BROKER: &str = "Broker";
pub const COLUMN_FEE_RATE: &str = "Fee Rate";
pub const COLUMN_FEE: &str = "Fee";
pub const COLUMN_VAT_RATE: &str = "VAT Rate";
pub const COLUMN_VAT: &str = "VAT";
pub const COLUMN_NET_TOTAL: &str = "Net Total";
pub const COLUMN_NOTES: &str = "Notes";

/// Columns every imported file must carry
pub const REQUIRED_IMPORT_COLUMNS: [&str; 5] = [
    COLUMN_DATE,
    COLUMN_TICKER,
    COLUMN_TRANSACTION_TYPE,
    COLUMN_PRICE,
    COLUMN_QUANTITY,
];

/// Columns a restored backup must carry
pub const REQUIRED_RESTORE_COLUMNS: [&str; 6] = [
    COLUMN_DATE,
    COLUMN_TICKER,
    COLUMN_TRANSACTION_TYPE,
    COLUMN_PRICE,
    COLUMN_QUANTITY,
    COLUMN_TOTAL,
];

/// Date formats accepted on import, tried in order
pub const IMPORT_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Date format used on export
pub const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d";
