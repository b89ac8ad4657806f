use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` wins over `default_filter`;
/// `json` switches to structured output for log shipping. Calling it again
/// is harmless.
pub fn init_tracing(default_filter: &str, json: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if json {
        registry.with(fmt_layer.with_ansi(false).json()).try_init()
    } else {
        registry.with(fmt_layer).try_init()
    };
    if let Err(err) = result {
        tracing::debug!(error = %err, "subscriber already installed");
    }
}
