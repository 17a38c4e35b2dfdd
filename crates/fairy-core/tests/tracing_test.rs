//! Tests for the FAIRy tracing setup.

use std::sync::Mutex;

use fairy_core::tracing::init_tracing;

static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_fairy_log_debug() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("FAIRY_LOG", "fairy_analysis=debug");
    init_tracing();
    std::env::remove_var("FAIRY_LOG");
}

#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    init_tracing();
    tracing::info!(target: "fairy::test", "still alive after repeated init");
}

#[test]
fn test_invalid_fairy_log_fallback() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("FAIRY_LOG", "[[not a filter");
    init_tracing();
    std::env::remove_var("FAIRY_LOG");
}
