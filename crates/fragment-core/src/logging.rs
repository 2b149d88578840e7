use console::style;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Mutex, Once};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, warn};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// Static to ensure we only initialize logging once
static INIT_LOGGER: Once = Once::new();

// Target of events that are also printed directly; kept off the console layer
const REPORT_TARGET: &str = "fragment::report";

/// Initialize the logging subsystem.
///
/// Console output goes to stderr and honours `RUST_LOG`; without it the level
/// is `warn`, or `debug` when `verbose` is set. When `log_file` is given, a
/// second layer appends every debug-level event of the run to that file.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) {
    INIT_LOGGER.call_once(|| {
        let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };

        let mut console_filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();
        if let Ok(directive) = format!("{}=off", REPORT_TARGET).parse::<Directive>() {
            console_filter = console_filter.add_directive(directive);
        }
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(console_filter);

        let file_layer = log_file.and_then(|path| {
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => Some(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_filter(LevelFilter::DEBUG),
                ),
                Err(e) => {
                    eprintln!("Warning: Could not open log file {}: {}", path.display(), e);
                    None
                }
            }
        });

        if let Err(e) = tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer)
            .try_init()
        {
            eprintln!("Warning: Could not initialize logging: {}", e);
        } else {
            debug!("Logging initialized at level: {}", level);
        }
    });
}

/// Log a warning message
pub fn log_warning(message: &str) {
    warn!(target: REPORT_TARGET, "{}", message);
    eprintln!("{} {}", style("!").bold().yellow(), message);
}

/// Log an error message
pub fn log_error(message: &str) {
    error!(target: REPORT_TARGET, "{}", message);
    eprintln!("{} {}", style("✗").bold().red(), message);
}
