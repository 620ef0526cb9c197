#![deny(missing_docs)]
//! Shared logging utilities for the decode pipeline workspace.
//!
//! This crate provides the `pipeline_*` logging macros used across the
//! codebase and a minimal test initializer for the global logger.
//!
//! Every macro accepts an optional `selection = <id>;` prefix which tags the
//! record with the file selection it belongs to:
//!
//! ```ignore
//! pipeline_info!(selection = 3; "decoded {} bytes", len);
//! pipeline_warn!("artifact store already holds {} locators", live);
//! ```

/// Log target shared by all pipeline records.
pub const TARGET: &str = "sii_decode";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! pipeline_trace {
    (selection = $id:expr; $($arg:tt)*) => {{
        log::trace!(target: $crate::TARGET, "[selection {}] {}", $id, format_args!($($arg)*));
    }};
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! pipeline_debug {
    (selection = $id:expr; $($arg:tt)*) => {{
        log::debug!(target: $crate::TARGET, "[selection {}] {}", $id, format_args!($($arg)*));
    }};
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! pipeline_info {
    (selection = $id:expr; $($arg:tt)*) => {{
        log::info!(target: $crate::TARGET, "[selection {}] {}", $id, format_args!($($arg)*));
    }};
    ($($arg:tt)*) => {{
        log::info!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! pipeline_warn {
    (selection = $id:expr; $($arg:tt)*) => {{
        log::warn!(target: $crate::TARGET, "[selection {}] {}", $id, format_args!($($arg)*));
    }};
    ($($arg:tt)*) => {{
        log::warn!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! pipeline_error {
    (selection = $id:expr; $($arg:tt)*) => {{
        log::error!(target: $crate::TARGET, "[selection {}] {}", $id, format_args!($($arg)*));
    }};
    ($($arg:tt)*) => {{
        log::error!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// Safe to call from every test: it no-ops once a logger is installed.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}
