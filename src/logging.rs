use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes the logging system with console output.
///
/// `RUST_LOG` overrides the default `roster_tools=info` directive. Diagnostics
/// go to stderr so stdout stays reserved for the one-line confirmations the
/// tools print on success.
pub fn init_logging() {
    let console_layer = fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("roster_tools=info".parse().unwrap()))
        .with(console_layer)
        .init();
}
