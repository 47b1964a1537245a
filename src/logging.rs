// Logger setup plus conditional logging macros for hot UI paths.
// The macros are only active in debug builds.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Install the global logger.
///
/// With `log_file` everything at `RUST_LOG` (default `info`) goes to that file.
/// Otherwise warnings go to stderr, or nowhere when `quiet` is set because the
/// terminal belongs to the TUI.
pub fn init_logging(log_file: Option<&Path>, quiet: bool) -> io::Result<()> {
    let mut builder = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
            builder.target(Target::Pipe(Box::new(file)));
            builder
        }
        None if quiet => {
            let mut builder = Builder::new();
            builder.filter_level(LevelFilter::Off);
            builder
        }
        None => Builder::from_env(Env::default().default_filter_or("warn")),
    };

    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    // A logger may already be installed (tests); keep it.
    let _ = builder.try_init();
    Ok(())
}
