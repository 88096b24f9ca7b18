//! Environment variables recognized by gog.

use std::env;

// Helper for boolean environment variables that accept "1", "true", "yes"
fn is_enabled(var: &str) -> bool {
    env::var(var).ok().is_some_and(|s| {
        let s = s.to_lowercase();
        s == "1" || s == "true" || s == "yes"
    })
}

/// Enable debug logging on stderr (`GOG_DEBUG`).
pub fn gog_debug() -> bool {
    is_enabled("GOG_DEBUG")
}

/// Custom configuration file path (`GOG_CONFIG`).
pub fn gog_config() -> Option<String> {
    env::var("GOG_CONFIG").ok().filter(|path| !path.trim().is_empty())
}

/// Skip loading configuration files entirely (`GOG_NO_CONFIG`).
pub fn gog_no_config() -> bool {
    is_enabled("GOG_NO_CONFIG")
}
