use std::str::FromStr;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crates that are chatty below `info`.
const QUIET_DEPENDENCIES: &[&str] = &["h2", "hyper", "hyper_util", "reqwest"];

/// Filter directives for `log_level`. A bare level also quiets the HTTP
/// stack; anything containing `,` or `=` is used as given.
pub fn filter_spec(log_level: &str) -> String {
    let level = log_level.trim();
    if level.contains(',') || level.contains('=') {
        return level.to_string();
    }
    let mut spec = level.to_string();
    for target in QUIET_DEPENDENCIES {
        spec.push_str(&format!(",{target}=info"));
    }
    spec
}

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays clean.
pub fn setup_logging(log_level: &str, json_format: bool) {
    let spec = filter_spec(log_level);
    let filter = EnvFilter::from_str(&spec).unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::registry().with(filter);

    let installed = if json_format {
        let layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_current_span(false);
        subscriber.with(layer).try_init()
    } else {
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact();
        subscriber.with(layer).try_init()
    };

    if installed.is_ok() {
        tracing::debug!(
            filter = %spec,
            format = if json_format { "json" } else { "compact" },
            "logging initialized"
        );
    }
}
