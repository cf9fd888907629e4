mod report_calculator;
mod report_model;

#[cfg(test)]
mod report_calculator_tests;

pub use report_calculator::*;
pub use report_model::*;
