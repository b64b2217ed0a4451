use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Log records from the core library arrive
/// through the `log` facade and are bridged into `tracing`.
///
/// `RUST_LOG` takes precedence over `verbosity`.
pub fn init(verbosity: u8) -> Result<(), String> {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed to install tracing subscriber: {}", e))?;

    LogTracer::init().map_err(|e| format!("Failed to bridge log records: {}", e))?;
    Ok(())
}
