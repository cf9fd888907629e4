/// Decimal precision for money and percentages in output rows
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Default commission rate (0.16%)
pub const DEFAULT_FEE_RATE: &str = "0.0016";

/// Default VAT rate charged on the commission (7%)
pub const DEFAULT_VAT_RATE: &str = "0.07";

/// Broker label used when none is given or the label is not recognised
pub const DEFAULT_BROKER: &str = "Other";

/// Broker labels recognised by the bulk importer
pub const KNOWN_BROKERS: [&str; 13] = [
    "Interactive Brokers",
    "TD Ameritrade",
    "Robinhood",
    "E*TRADE",
    "Charles Schwab",
    "Fidelity",
    "Vanguard",
    "Merrill Edge",
    "Webull",
    "DEGIRO",
    "Saxo Bank",
    "eToro",
    DEFAULT_BROKER,
];

/// Largest share count accepted for a single transaction
pub const MAX_QUANTITY: u64 = 1_000_000_000;

/// Largest per-share price accepted for a single transaction
pub const MAX_PRICE: u64 = 1_000_000_000;
