//! Tracing setup for test binaries.

use std::sync::Once;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Install a compact subscriber writing through the test harness.
///
/// Honors `RUST_LOG`, defaulting to `info,fluent_assert=debug`. Only the first
/// call in a process has an effect.
pub fn init_test_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,fluent_assert=debug"));
        install(filter);
    });
}

/// Like [`init_test_tracing`] with an explicit filter directive.
pub fn init_test_tracing_with_filter(filter: &str) {
    INIT.call_once(|| install(EnvFilter::new(filter)));
}

fn install(filter: EnvFilter) {
    // another subscriber may already be installed by the test binary
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_test_writer()
                .compact(),
        )
        .try_init();
}
