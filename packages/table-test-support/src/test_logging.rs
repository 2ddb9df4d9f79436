//! Test logging shared by the table client's unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Quiet by default; engine prefixes still show up on warnings.
const DEFAULT_DIRECTIVES: &str = "warn";

/// First set variable among `TEST_LOG` and `RUST_LOG`, else `fallback`.
pub fn filter_directives(fallback: &str) -> String {
    ["TEST_LOG", "RUST_LOG"]
        .iter()
        .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| fallback.to_string())
}

/// Install the compact test subscriber once per test binary.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_new(filter_directives(DEFAULT_DIRECTIVES))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

        fmt()
            .compact()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
