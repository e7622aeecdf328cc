//! Test helpers shared by unit and integration tests.

use std::sync::Once;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Route tracing output through the test harness, once per test binary.
///
/// `RUST_LOG` wins over the `debug` default. Thread names are shown so
/// worker lines can be told apart.
pub fn init_test_setup() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_thread_names(true)
            .with_span_events(FmtSpan::CLOSE)
            .try_init();
        if let Err(e) = installed {
            eprintln!("test tracing already installed: {e}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_test_setup();
        init_test_setup();
        tracing::debug!("subscriber installed");
    }
}
