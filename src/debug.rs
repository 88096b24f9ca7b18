//! Debug logging utilities
//!
//! Diagnostics go to stderr only, so they never end up in completion output.
//! Enabled by the global `--debug` flag, the `GOG_DEBUG` environment variable
//! or `debug = true` in the configuration file. When disabled, logging is a
//! single atomic load.

use std::sync::OnceLock;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Initialize debug mode once per process; later calls are ignored
pub fn init_debug(enabled: bool) {
    if DEBUG_ENABLED.set(enabled).is_err() {
        debug_log("debug mode already initialized");
    }
}

/// Check if debug mode is enabled
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.get().copied().unwrap_or(false)
}

/// Print a debug message if debug mode is enabled
pub fn debug_log(message: &str) {
    if is_debug_enabled() {
        eprintln!("[DEBUG] gog: {message}");
    }
}

/// Print formatted debug message if debug mode is enabled
pub fn debug_logf(args: std::fmt::Arguments<'_>) {
    if is_debug_enabled() {
        eprintln!("[DEBUG] gog: {args}");
    }
}

/// Macro for convenient debug logging
///
/// Usage: `debug!("resolved {} suggestions", count)`
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::debug::debug_logf(format_args!($($arg)*))
    };
}
