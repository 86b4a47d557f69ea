//! Tests for the gridtrace tracing setup.

use std::sync::Mutex;

use gridtrace_core::tracing::{init_tracing, init_tracing_with_default};

/// Serializes tests that touch `GRIDTRACE_LOG`.
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_gridtrace_log_debug() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("GRIDTRACE_LOG", "debug");
    init_tracing();
    std::env::remove_var("GRIDTRACE_LOG");
}

#[test]
fn test_per_module_filtering_accepted() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("GRIDTRACE_LOG", "gridtrace_traversal=trace,gridtrace_network=warn");
    init_tracing();
    std::env::remove_var("GRIDTRACE_LOG");
}

#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing_with_default("gridtrace=debug");
    init_tracing();
    tracing::info!("still logging after repeated init");
}
