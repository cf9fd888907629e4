mod summary_calculator;
mod summary_model;

#[cfg(test)]
mod summary_calculator_tests;

pub use summary_calculator::*;
pub use summary_model::*;
