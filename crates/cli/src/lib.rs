//! vpro CLI library
//!
//! Shared by the `vpro-ecr` and `vpro-s3` binaries and exported for
//! integration tests.

pub mod commands;
pub mod exit_code;
pub mod output;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber
///
/// Logs go to stderr so stdout only carries the result. `RUST_LOG` controls
/// the filter; `debug` forces debug output for the vpro crates.
pub fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("vpro_core=debug,vpro_aws=debug,vpro_cli=debug")
    } else {
        EnvFilter::from_default_env()
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
