//! finlit-core
//!
//! Ledger services, calculators and text helpers for FinLit.
//! Depends on finlit-domain. No CLI, no terminal I/O, no concrete storage backend.

pub mod advisor;
pub mod budget_ledger;
pub mod calculators;
pub mod error;
pub mod format;
pub mod loan_ledger;
pub mod quiz;
pub mod storage;
pub mod time;

pub use advisor::*;
pub use budget_ledger::*;
pub use calculators::*;
pub use error::CoreError;
pub use format::*;
pub use loan_ledger::*;
pub use quiz::*;
pub use storage::*;
pub use time::*;
