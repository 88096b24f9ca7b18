//! Shared test helpers and utilities

use std::process::Command;

/// Get the path to the gog binary built for this test run
pub(crate) fn get_gog_binary() -> String {
    env!("CARGO_BIN_EXE_gog").to_string()
}

/// A `gog` command isolated from the developer's environment
///
/// Configuration files and `GOG_*` variables are ignored unless a test sets
/// them again.
pub(crate) fn gog_command() -> Command {
    let mut cmd = Command::new(get_gog_binary());
    cmd.env("GOG_NO_CONFIG", "1")
        .env_remove("GOG_CONFIG")
        .env_remove("GOG_DEBUG")
        .env_remove("GOG_ACCOUNT");
    cmd
}

/// Run `gog __complete` with the default environment
pub(crate) fn complete(words: &[&str], cword: i64) -> Vec<String> {
    complete_with(gog_command(), words, cword)
}

/// Run `gog __complete` through `cmd` and return one entry per output line
pub(crate) fn complete_with(mut cmd: Command, words: &[&str], cword: i64) -> Vec<String> {
    let output = cmd
        .arg("__complete")
        .arg(format!("--cword={cword}"))
        .arg("--")
        .args(words)
        .output()
        .expect("Failed to execute gog __complete");

    assert!(
        output.status.success(),
        "gog __complete failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout)
        .expect("completion output is UTF-8")
        .lines()
        .map(str::to_string)
        .collect()
}
