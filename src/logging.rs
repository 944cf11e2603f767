use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "erp_metrics=warn";

/// Installs the global subscriber. `RUST_LOG` takes precedence over the
/// default directive; events go to stderr so reports on stdout stay clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_repeatable() {
        super::init_tracing();
        super::init_tracing();
    }
}
