#![doc(test(attr(deny(warnings))))]

//! Budget Forecast turns a daily balance history into trend, streak and
//! end-of-period projections, and ships a small CLI that keeps the history
//! in a local JSON store.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Forecast tracing initialized.");
    });
}
