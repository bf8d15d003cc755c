//! Logging setup for the modalias CLI.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "modalias=debug,modalias_config=debug,modalias_cli=debug";
const QUIET_FILTER: &str = "modalias=error,modalias_config=error,modalias_cli=error";
const DEFAULT_FILTER: &str = "modalias=info,modalias_config=info,modalias_cli=info";

/// Pick the filter for the given flags.
///
/// `--verbose` and `--quiet` win over `RUST_LOG`; otherwise `RUST_LOG` is
/// used when set and valid, falling back to info for the modalias crates.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .init();
}

/// Whether stdout output should be colored.
///
/// `NO_COLOR` disables, `FORCE_COLOR` enables, otherwise terminal
/// capabilities decide.
pub fn should_use_colors(no_color: bool) -> bool {
    if no_color || std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stdout().features().colors_supported()
}
