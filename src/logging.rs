use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// directive used when `RUST_LOG` is unset
pub const DEFAULT_DIRECTIVE: &str = "loanbook_rs=info";

/// install a global fmt subscriber filtered by `RUST_LOG`; later calls are no-ops
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // another subscriber may already be installed by the host application
        if fmt().with_env_filter(filter).try_init().is_ok() {
            tracing::info!("loanbook tracing initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
        assert!(TRACING_INIT.is_completed());
    }
}
