//! Diagnostic logging on stderr through `log` and `env_logger`.
//!
//! `RUST_LOG` wins when set. Otherwise `-q` keeps errors only, `-v` enables
//! debug and `-vv` trace; the default is info. Debug builds prefix each line
//! with a timestamp (and the module path under `-v`).

use env_logger::{Builder, WriteStyle};
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Initialize the logging subsystem based on CLI flags.
///
/// `verbose` counts `-v` flags; `quiet` limits output to errors and
/// `no_color` disables ANSI styles. `RUST_LOG`, when set, replaces the
/// level derived from the flags.
///
/// # Panics
///
/// Panics if a logger is already installed.
pub fn init_logging(verbose: u8, quiet: bool, no_color: bool) {
    let mut builder = Builder::new();
    builder.filter_level(determine_level(verbose, quiet));
    if env::var_os("RUST_LOG").is_some() {
        builder.parse_default_env();
    }
    builder.write_style(if no_color {
        WriteStyle::Never
    } else {
        WriteStyle::Auto
    });
    configure_format(&mut builder, verbose);
    builder.init();

    log::trace!("Logger ready (max level {})", log::max_level());
}

/// Determine the log level from CLI flags.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Install the line format: `[timestamp] LEVEL [module] message`, where the
/// bracketed parts depend on the build and on `verbose`.
fn configure_format(builder: &mut Builder, verbose: u8) {
    let with_timestamp = cfg!(debug_assertions);
    let with_module = with_timestamp && verbose >= 1;

    builder.format(move |buf, record| {
        let style = buf.default_level_style(record.level());
        if with_timestamp {
            let timestamp = buf.timestamp_seconds();
            write!(buf, "{timestamp} ")?;
        }
        write!(buf, "{style}{:<5}{style:#} ", record.level())?;
        if with_module {
            write!(buf, "[{}] ", record.module_path().unwrap_or("unknown"))?;
        }
        writeln!(buf, "{}", record.args())
    });
}
