//! gog internal library code
//!
//! Shell completion for the `gog` command line: a command tree built from the
//! CLI definition, a resolver that walks it, and the shell scripts that call
//! back into `gog __complete`.

/// Name of the installed binary
pub const PROGRAM_NAME: &str = "gog";

pub mod command_tree;
pub mod complete;
pub mod config;
pub mod debug;
pub mod env_vars;
pub mod paths;
pub mod shell_scripts;

// Re-export common types for convenience
pub use command_tree::{
    BuildError, CommandNode, CommandSpec, FlagArity, FlagSpec, Negation, from_clap,
};
pub use complete::{Completer, TERMINATOR};
pub use config::{CompletionConfig, Config, ConfigError};
pub use debug::{debug_log, debug_logf, init_debug, is_debug_enabled};
pub use shell_scripts::{COMPLETE_COMMAND, ScriptError};

/// Build a completer for a clap command definition
///
/// # Errors
///
/// Returns a [`BuildError`] if the definition cannot be turned into a tree.
pub fn completer_for(command: &clap::Command) -> Result<Completer, BuildError> {
    let spec = from_clap(command)?;
    let root = CommandNode::build(&spec)?;
    Ok(Completer::new(root, command.get_name()))
}
