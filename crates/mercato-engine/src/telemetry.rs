//! Tracing setup for host applications.
//!
//! The engine itself only emits `tracing` events; a host binary calls
//! [`init_tracing`] once at startup to get them on stderr. Filtering
//! follows `RUST_LOG` (`mercato_engine=debug` shows every admission and
//! staleness decision).

use tracing_subscriber::{fmt, EnvFilter};

/// Installs a stderr subscriber honoring `RUST_LOG`, defaulting to `info`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
