//! Completion command
//!
//! Print shell completion scripts

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use gog::shell_scripts::{self, ScriptError};
use gog::{PROGRAM_NAME, debug};
use std::io::{self, Write};

/// Print a completion script for `shell` to stdout
///
/// By default the script calls back into `gog __complete` on every TAB, so
/// completions always match the installed binary. `--static` (and shells with
/// no dynamic script, such as elvish) get clap's pre-generated script.
///
/// # Examples
///
/// ```bash
/// # Bash
/// gog completion bash > /usr/local/share/bash-completion/completions/gog
///
/// # Zsh
/// gog completion zsh > /usr/local/share/zsh/site-functions/_gog
///
/// # Fish
/// gog completion fish > ~/.config/fish/completions/gog.fish
/// ```
pub(crate) fn run(shell: Shell, static_script: bool) -> Result<()> {
    let script = render(shell, static_script)?;
    io::stdout()
        .lock()
        .write_all(script.as_bytes())
        .context("Failed to write completion script")
}

fn render(shell: Shell, static_script: bool) -> Result<String> {
    if static_script {
        return Ok(static_script_for(shell));
    }

    match shell_scripts::script(shell, PROGRAM_NAME) {
        Ok(script) => Ok(script),
        Err(ScriptError::UnsupportedShell(name)) => {
            debug!("no dynamic completion for {name}, using static script");
            Ok(static_script_for(shell))
        }
        Err(err) => Err(err.into()),
    }
}

fn static_script_for(shell: Shell) -> String {
    let mut cmd = crate::Cli::command();
    let mut buffer = Vec::new();
    generate(shell, &mut cmd, PROGRAM_NAME, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}
