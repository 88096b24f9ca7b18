//! Hidden `__complete` command
//!
//! Called by the shell scripts from `gog completion`. Prints one suggestion
//! per line. Failures are logged with `--debug`/`GOG_DEBUG` and produce no
//! suggestions; a completion request must never make the shell show an error.

use anyhow::{Context, Result};
use clap::CommandFactory;
use gog::{Completer, Config, ConfigError, debug};
use std::io::{self, Write};

/// Resolve and print completions for `words` with the cursor at `cword`
pub(crate) fn run(config: Result<Config, ConfigError>, cword: i64, words: &[String]) -> Result<()> {
    let completer = match build_completer(config) {
        Ok(completer) => completer,
        Err(err) => {
            debug!("completion unavailable: {err:#}");
            return Ok(());
        }
    };

    let suggestions = completer.resolve(words, cword);
    debug!(
        "cword={cword} words={words:?} programs={:?} -> {} suggestion(s)",
        completer.program_names(),
        suggestions.len()
    );

    write_lines(&mut io::stdout().lock(), &suggestions).context("Failed to write completions")
}

fn build_completer(config: Result<Config, ConfigError>) -> Result<Completer> {
    let config = config.context("Failed to load configuration")?;
    let completer =
        gog::completer_for(&crate::Cli::command()).context("Failed to build command tree")?;
    Ok(completer.with_program_names(config.completion.program_names))
}

fn write_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests can panic")]
mod tests {
    use super::*;

    fn completer() -> Completer {
        build_completer(Ok(Config::default())).unwrap()
    }

    fn resolve(words: &[&str], cword: i64) -> Vec<String> {
        completer().resolve(words, cword)
    }

    #[test]
    fn top_level_offers_visible_commands() {
        let got = resolve(&["gog", ""], 1);
        for expected in ["auth", "classroom", "completion", "gmail", "--account", "--help"] {
            assert!(got.contains(&expected.to_string()), "missing {expected} in {got:?}");
        }
        assert!(!got.contains(&gog::COMPLETE_COMMAND.to_string()));
    }

    #[test]
    fn global_flags_reach_nested_commands() {
        let got = resolve(&["gog", "auth", "--account"], 2);
        assert_eq!(got, ["--account"]);
    }

    #[test]
    fn account_value_is_not_completed() {
        assert!(resolve(&["gog", "auth", "--account", "x"], 3).is_empty());
        assert!(resolve(&["gog", "gmail", "-a", ""], 3).is_empty());
    }

    #[test]
    fn visible_aliases_are_completed() {
        assert_eq!(resolve(&["gog", "gmail", "search", "--l"], 3), ["--limit"]);
        assert_eq!(resolve(&["gog", "classroom", "courses", "r"], 3), ["rm"]);
    }

    #[test]
    fn legacy_gmail_commands_stay_hidden() {
        assert!(resolve(&["gog", "gmail", "wa"], 2).is_empty());
        assert!(resolve(&["gog", "gmail", "del"], 2).is_empty());
        assert!(resolve(&["gog", "gmail", "f"], 2).is_empty());
        assert_eq!(resolve(&["gog", "gmail", "sen"], 2), ["send"]);
        assert_eq!(resolve(&["gog", "gmail", "settings", "sen"], 3), ["sendas"]);
        assert_eq!(resolve(&["gog", "gmail", "settings", "wa"], 3), ["watch"]);
    }

    #[test]
    fn gmail_batch_is_offered() {
        assert_eq!(resolve(&["gog", "gmail", "b"], 2), ["batch"]);
        let commands: Vec<String> = resolve(&["gog", "gmail", "batch", ""], 3)
            .into_iter()
            .filter(|word| !word.starts_with('-'))
            .collect();
        assert_eq!(commands, ["delete", "modify"]);
        assert_eq!(resolve(&["gog", "gmail", "batch", "modify", "--r"], 4), ["--remove"]);
    }

    #[test]
    fn configured_program_names_are_recognized() {
        let config = Config {
            completion: gog::CompletionConfig {
                program_names: vec!["gmail".to_string()],
            },
            ..Config::default()
        };
        let completer = build_completer(Ok(config)).unwrap();
        assert_eq!(completer.program_names(), ["gog", "gmail"]);
        assert!(completer.resolve(&["gmail", "se"], 1).is_empty());
        assert_eq!(
            completer.resolve(&["gog", "gmail", "se"], 2),
            ["search", "send", "settings"]
        );
    }

    #[test]
    fn scripts_and_cli_agree_on_the_callback_name() {
        let cli = crate::Cli::command();
        let hidden = cli.find_subcommand(gog::COMPLETE_COMMAND).unwrap();
        assert!(hidden.is_hide_set());
    }

    #[test]
    fn lines_are_newline_terminated() {
        let mut out = Vec::new();
        write_lines(&mut out, &["auth".to_string(), "gmail".to_string()]).unwrap();
        assert_eq!(out, b"auth\ngmail\n");
    }
}
