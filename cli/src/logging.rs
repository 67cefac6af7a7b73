//! # Logging
//!
//! `tracing` subscriber setup. Logs go to stderr so generated documents can be piped.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` wins over the verbosity flag.
pub fn init_cli_logger(verbose: bool) {
    let default_filter = if verbose {
        "wsdlgen=debug,wsdlgen_core=debug,info"
    } else {
        "wsdlgen=info,wsdlgen_core=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
