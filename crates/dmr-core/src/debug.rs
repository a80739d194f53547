use std::fs::OpenOptions;
use std::sync::Once;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt as tracingfmt};

static INIT_LOG: Once = Once::new();

/// Sets up logging with maximum verbosity (trace level)
/// Mainly for unit tests
pub fn setup_logging_verbose() {
    setup_logging(EnvFilter::new("trace"), None);
}

/// Sets up default logging to stdout and optionally, a verbose log file
/// Returns a guard, that needs to be kept alive for logging to file to work
pub fn setup_logging_default(verbose_logfile: Option<String>) -> Option<WorkerGuard> {
    let stdout_filter = get_default_stdout_filter();
    let logfile_and_filter = verbose_logfile.map(|file| (file, get_default_logfile_filter()));
    setup_logging(stdout_filter, logfile_and_filter)
}

pub fn get_default_stdout_filter() -> EnvFilter {
    EnvFilter::new("info")
        // Per-stage codec dumps are trace-only noise in normal operation
        .add_directive("dmr_fec=warn".parse().unwrap())
        .add_directive("dmr_core::bits=warn".parse().unwrap())
        // Burst composition
        .add_directive("dmr_burst::burst=info".parse().unwrap())
        .add_directive("dmr_burst=debug".parse().unwrap())
}

fn get_default_logfile_filter() -> EnvFilter {
    EnvFilter::new("debug")
}

/// Sets up logging to stdout and optionally, a verbose log file
/// If an output file is requested, returns Some<WorkerGuard>. Keep this value alive
/// or logging to file may cease working. If no output file is provided, returns None.
fn setup_logging(
    stdout_filter: EnvFilter,
    outfile: Option<(String, EnvFilter)>,
) -> Option<WorkerGuard> {
    if let Some((outfile, outfile_filter)) = outfile {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(outfile)
            .expect("Failed to open log file");
        let (file_writer, guard) = tracing_appender::non_blocking(file);

        // Setup once
        INIT_LOG.call_once(|| {
            let file_layer = tracingfmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_writer(file_writer)
                .with_ansi(false);

            let stdout_layer = tracingfmt::layer().with_file(true).with_line_number(true);

            tracing_subscriber::registry()
                .with(file_layer.with_filter(outfile_filter))
                .with(stdout_layer.with_filter(stdout_filter))
                .init();
        });

        Some(guard)
    } else {
        // Setup once
        INIT_LOG.call_once(|| {
            let stdout_layer = tracingfmt::layer().with_file(true).with_line_number(true);

            tracing_subscriber::registry()
                .with(stdout_layer.with_filter(stdout_filter))
                .init();
        });
        None
    }
}
