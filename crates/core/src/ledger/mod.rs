mod ledger_model;
mod ledger_service;


pub use ledger_model::*;
pub use ledger_service::*;
