#![doc(test(attr(deny(warnings))))]

//! FinLit bundles the personal-finance learning core (budget and loan
//! ledgers, calculators, quiz) with a developer shell for exercising it.

pub mod cli;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("FinLit tracing initialized.");
    });
}
