//! Integration tests for the DocStack expression compiler.
//!
//! These tests exercise the public compile boundary end to end: building
//! expression trees, compiling them, and checking the produced wire text
//! and substitution tables (including their JSON wire form).

use std::sync::Once;

mod test_condition;
mod test_interning;
mod test_update;

static INIT: Once = Once::new();

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}
