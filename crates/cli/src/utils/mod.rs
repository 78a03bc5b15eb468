use tracing_subscriber::prelude::*;

/// Initializes a tracing Subscriber for logging
pub fn subscriber() {
    let registry = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::EnvFilter::from_default_env());
    registry.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)).init()
}

/// Loads a `.env` file from the cwd or its parents.
///
/// A missing file is fine, a malformed one is reported and skipped.
pub fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        warn!("failed to load .env file: {err}");
    }
}

/// Disables terminal colors if `NO_COLOR` is set or stdout is not a terminal.
pub fn enable_paint() {
    let enable = yansi::Condition::os_support() && yansi::Condition::tty_and_color_live();
    yansi::whenever(yansi::Condition::cached(enable));
}
