use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "UPKEEP_LOG";

/// Log to stderr so stdout stays clean for `--json`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "upkeep=debug" } else { "upkeep=warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
