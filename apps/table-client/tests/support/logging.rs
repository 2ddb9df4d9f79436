//! Logging for integration test binaries.
//!
//! Same initializer as the unit tests: `TEST_LOG`, then `RUST_LOG`, then
//! `"warn"`.
//!
//! ```bash
//! TEST_LOG=debug cargo test -p table-client --test engine_scenarios
//! ```

/// Runs once per integration test binary.
#[ctor::ctor]
fn _auto_init_for_integration_tests() {
    table_test_support::test_logging::init();
}
