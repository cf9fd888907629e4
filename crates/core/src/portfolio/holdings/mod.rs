mod holdings_calculator;
mod holdings_model;


pub use holdings_calculator::*;
pub use holdings_model::*;
