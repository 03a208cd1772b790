use tracing_subscriber::EnvFilter;

use crate::config::LogLevel;

/// Install the global subscriber. `RUST_LOG` directives refine `level`.
pub fn init_logger(level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.filter().into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
