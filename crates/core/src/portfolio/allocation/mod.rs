//! Portfolio allocation by ticker.

mod allocation_calculator;
mod allocation_model;

#[cfg(test)]
mod allocation_calculator_tests;

pub use allocation_calculator::*;
pub use allocation_model::*;
