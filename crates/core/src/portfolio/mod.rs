//! Portfolio analytics derived from a ledger snapshot.
//!
//! Every calculator here is a pure function of the transactions passed in.

pub mod allocation;
pub mod holdings;
pub mod performance;
pub mod report;
pub mod summary;

pub use allocation::*;
pub use holdings::*;
pub use performance::*;
pub use report::*;
pub use summary::*;
