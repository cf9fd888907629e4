//! Transaction records, validation, filtering and CSV interchange.

mod csv_parser;
mod transactions_constants;
mod transactions_csv;
mod transactions_filter;
mod transactions_model;
mod transactions_validation;


pub use csv_parser::{parse_csv, CsvRow, ParsedCsv};
pub use transactions_constants::*;
pub use transactions_csv::*;
pub use transactions_filter::*;
pub use transactions_model::*;
pub use transactions_validation::*;
