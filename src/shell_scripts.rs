//! Shell registration scripts for dynamic completion.
//!
//! Each script asks the program itself for suggestions by running
//! `<bin> __complete --cword <index> -- <words...>` and feeds the
//! newline-separated output back to the shell.

use clap_complete::Shell;
use thiserror::Error;

/// Name of the hidden subcommand the scripts call back into
pub const COMPLETE_COMMAND: &str = "__complete";

const BIN: &str = "__BIN__";
const COMPLETE: &str = "__COMPLETE__";

// Bash splits `--flag=value` at `=` (COMP_WORDBREAKS); the words are glued
// back together before they are handed to the resolver.
const BASH: &str = r#"#!/usr/bin/env bash

___BIN___complete() {
  if [[ -n ${ZSH_VERSION:-} ]]; then
    setopt local_options ksh_arrays
  fi
  local IFS=$'\n'
  local -a args=()
  local cword=-1 glue=0 i word completions
  for (( i = 0; i < ${#COMP_WORDS[@]}; i++ )); do
    word=${COMP_WORDS[i]}
    if (( glue )); then
      args[${#args[@]}-1]+=$word
      glue=0
    elif [[ $word == "=" && ${#args[@]} -gt 0 && ${args[${#args[@]}-1]} == -* ]]; then
      args[${#args[@]}-1]+=$word
      glue=1
    else
      args+=("$word")
    fi
    if (( i == COMP_CWORD )); then
      cword=$(( ${#args[@]} - 1 ))
    fi
  done
  completions=$(__BIN__ __COMPLETE__ --cword "$cword" -- "${args[@]}")
  COMPREPLY=()
  if [[ -n "$completions" ]]; then
    COMPREPLY=( $completions )
  fi
}

complete -F ___BIN___complete __BIN__
"#;

const ZSH_PREAMBLE: &str = "#compdef __BIN__

autoload -Uz bashcompinit
bashcompinit
";

const FISH: &str = r#"function ____BIN___complete
  set -l words (commandline -opc)
  set -l cur (commandline -ct)
  __BIN__ __COMPLETE__ --cword (count $words) -- $words $cur
end

complete -c __BIN__ -f -a "(____BIN___complete)"
"#;

const POWERSHELL: &str = r"Register-ArgumentCompleter -Native -CommandName __BIN__ -ScriptBlock {
  param($wordToComplete, $commandAst, $cursorPosition)
  $elements = @($commandAst.CommandElements | ForEach-Object { $_.ToString() })
  $cword = $elements.Count
  if ($wordToComplete) {
    $cword = $elements.Count - 1
  }
  $completions = __BIN__ __COMPLETE__ --cword $cword -- $elements
  foreach ($completion in $completions) {
    [System.Management.Automation.CompletionResult]::new($completion, $completion, 'ParameterValue', $completion)
  }
}
";

/// Errors from script generation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("dynamic completion is not available for {0}")]
    UnsupportedShell(String),

    #[error("invalid program name `{0}` for a completion script")]
    InvalidProgramName(String),
}

/// Dynamic completion script for `shell`, registering `bin`
pub fn script(shell: Shell, bin: &str) -> Result<String, ScriptError> {
    let valid_name = !bin.is_empty()
        && bin
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if !valid_name {
        return Err(ScriptError::InvalidProgramName(bin.to_string()));
    }

    let template = match shell {
        Shell::Bash => BASH.to_string(),
        Shell::Zsh => format!("{ZSH_PREAMBLE}{BASH}"),
        Shell::Fish => FISH.to_string(),
        Shell::PowerShell => POWERSHELL.to_string(),
        other => return Err(ScriptError::UnsupportedShell(other.to_string())),
    };
    Ok(template.replace(BIN, bin).replace(COMPLETE, COMPLETE_COMMAND))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests can panic")]
mod tests {
    use super::*;

    #[test]
    fn every_dynamic_script_calls_back_into_the_program() {
        let cases = [
            (Shell::Bash, "complete -F _gog_complete gog"),
            (Shell::Zsh, "bashcompinit"),
            (Shell::Fish, "complete -c gog"),
            (Shell::PowerShell, "Register-ArgumentCompleter"),
        ];
        for (shell, marker) in cases {
            let script = script(shell, "gog").unwrap();
            let callback = format!("gog {COMPLETE_COMMAND} --cword");
            assert!(script.contains(&callback), "{shell}: {script}");
            assert!(script.contains(marker), "{shell}: missing {marker}");
            assert!(!script.contains(BIN), "{shell}: unreplaced placeholder");
            assert!(!script.contains(COMPLETE), "{shell}: unreplaced placeholder");
        }
    }

    #[test]
    fn zsh_reuses_the_bash_function() {
        let zsh = script(Shell::Zsh, "gog").unwrap();
        assert!(zsh.starts_with("#compdef gog\n"));
        assert!(zsh.ends_with(&script(Shell::Bash, "gog").unwrap()));
    }

    #[test]
    fn program_name_is_substituted() {
        let bash = script(Shell::Bash, "gog-dev").unwrap();
        assert!(bash.contains("_gog-dev_complete()"));
        assert!(bash.contains("complete -F _gog-dev_complete gog-dev"));
    }

    #[test]
    fn elvish_has_no_dynamic_script() {
        assert_eq!(
            script(Shell::Elvish, "gog").unwrap_err(),
            ScriptError::UnsupportedShell("elvish".to_string())
        );
    }

    #[test]
    fn rejects_names_that_would_break_the_script() {
        assert!(matches!(
            script(Shell::Bash, "gog; rm -rf ~"),
            Err(ScriptError::InvalidProgramName(_))
        ));
        assert!(script(Shell::Bash, "").is_err());
    }
}
