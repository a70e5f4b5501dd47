use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

// Diagnostic logger: timestamped, coloured, topic-filtered for debug records
#[derive(Debug)]
struct CraterLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl log::Log for CraterLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        // Debug and trace records only pass when their topic is listed
        if let Some(filters) = &self.debug_filters {
            if metadata.level() >= log::Level::Debug {
                return filters.contains(metadata.target())
                    || filters.iter().any(|f| metadata.target().starts_with(f.as_str()));
            }
        }
        true
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        let message = record.args().to_string();
        let (context, message) = split_tick_context(&message);

        let mut output = format!(
            "{timestamp} {level_color}{level:5}{reset} {context}{target}: {message}",
            level = record.level(),
            target = record.target(),
        );
        if let Some(module_path) = record.module_path() {
            if module_path != record.target() {
                output.push_str(&format!(" [{}]", module_path));
            }
        }

        // A closed stdout is not worth aborting the match over
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", output);
        let _ = stdout.flush();
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

/// Pulls a leading "Tick N " marker out of a message and renders it as `[T00042] `.
fn split_tick_context(message: &str) -> (String, &str) {
    if let Some(rest) = message.strip_prefix("Tick ") {
        let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if let Ok(tick) = rest[..digits].parse::<u64>() {
            return (format!("[T{:05}] ", tick), rest[digits..].trim_start());
        }
    }
    (String::new(), message)
}

static LOGGER: OnceLock<CraterLogger> = OnceLock::new();

/// Installs the diagnostic logger. `debug_filter` is a comma separated list of topics
/// (`physics`, `turn`, `ai`, `combat`, `events`) whose debug output should be shown.
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let debug_filters = debug_filter.map(|filter_str| {
        filter_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<HashSet<String>>()
    });

    let logger = LOGGER.get_or_init(|| CraterLogger {
        level,
        debug_filters,
    });
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

// Helper macros for specific debug topics
#[macro_export]
macro_rules! debug_physics {
    (tick: $tick:expr, $($arg:tt)*) => {
        log::debug!(target: "physics", "Tick {} {}", $tick, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "physics", "{}", format_args!($($arg)*))
    }
}

#[macro_export]
macro_rules! debug_turn {
    (tick: $tick:expr, $($arg:tt)*) => {
        log::debug!(target: "turn", "Tick {} {}", $tick, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "turn", "{}", format_args!($($arg)*))
    }
}

#[macro_export]
macro_rules! debug_ai {
    (tick: $tick:expr, $($arg:tt)*) => {
        log::debug!(target: "ai", "Tick {} {}", $tick, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "ai", "{}", format_args!($($arg)*))
    }
}

#[macro_export]
macro_rules! debug_combat {
    (tick: $tick:expr, $($arg:tt)*) => {
        log::debug!(target: "combat", "Tick {} {}", $tick, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "combat", "{}", format_args!($($arg)*))
    }
}
