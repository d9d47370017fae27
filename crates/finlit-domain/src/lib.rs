//! finlit-domain
//!
//! Pure domain models (BudgetRecord, LoanRecord and their shared traits).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod budget;
pub mod common;
pub mod loan;

pub use budget::*;
pub use common::*;
pub use loan::*;
