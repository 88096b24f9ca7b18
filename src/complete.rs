//! Shell completion resolver
//!
//! Walks a built [`CommandNode`] tree along the words typed so far and
//! returns the subcommand and flag tokens that may follow at the cursor.
//! Flag values are never completed.

use crate::command_tree::CommandNode;
use std::collections::BTreeSet;

/// Marks the end of flags and subcommands on a command line
pub const TERMINATOR: &str = "--";

/// Resolves completions against an immutable command tree
///
/// A `Completer` holds no mutable state, so one instance can serve any number
/// of concurrent [`resolve`](Self::resolve) calls.
#[derive(Debug, Clone)]
pub struct Completer {
    root: CommandNode,
    program_names: Vec<String>,
}

impl Completer {
    /// Create a completer for `root`, recognizing `program_name` as the first word
    pub fn new(root: CommandNode, program_name: impl Into<String>) -> Self {
        Self {
            root,
            program_names: vec![program_name.into()],
        }
    }

    /// Recognize additional invocation names (for example a shell alias target)
    #[must_use]
    pub fn with_program_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !name.is_empty() && !self.program_names.contains(&name) {
                self.program_names.push(name);
            }
        }
        self
    }

    pub fn root(&self) -> &CommandNode {
        &self.root
    }

    pub fn program_names(&self) -> &[String] {
        &self.program_names
    }

    /// Suggestions for the word at `cword`, sorted and deduplicated
    ///
    /// A negative `cword` completes the last word; a `cword` past the end
    /// completes a new, empty word. An empty result means "no completions".
    pub fn resolve<S: AsRef<str>>(&self, tokens: &[S], cword: i64) -> Vec<String> {
        if tokens.is_empty() {
            return Vec::new();
        }
        let Some(cword) = normalize_cword(cword, tokens.len()) else {
            return Vec::new();
        };
        let start = usize::from(word_at(tokens, 0).is_some_and(|first| self.is_program_name(first)));

        let mut node = &self.root;
        let mut terminator = None;
        let mut index = start;
        while index < cword {
            let Some(token) = word_at(tokens, index) else {
                break;
            };
            if token == TERMINATOR {
                terminator = Some(index);
                break;
            }
            if token.starts_with('-') {
                let (flag, inline_value) = split_flag_token(token);
                let takes_value = node.flag(flag).is_some_and(|arity| arity.takes_value);
                if !inline_value && takes_value {
                    if index + 1 == cword {
                        return Vec::new();
                    }
                    index += 2;
                } else {
                    index += 1;
                }
                continue;
            }
            if let Some(child) = node.child(token) {
                node = child;
            }
            index += 1;
        }

        if terminator.is_some_and(|terminator| cword >= terminator) {
            return Vec::new();
        }
        if word_at(tokens, cword) == Some(TERMINATOR) {
            return Vec::new();
        }

        if cword > start
            && let Some(previous) = word_at(tokens, cword - 1)
            && previous.starts_with('-')
        {
            let (flag, _) = split_flag_token(previous);
            if node.flag(flag).is_some_and(|arity| arity.takes_value) {
                return Vec::new();
            }
        }

        let current = word_at(tokens, cword).unwrap_or_default();
        suggestions(node, current)
    }

    /// Whether `word` is how this program was invoked
    ///
    /// Accepts the bare name and any path whose last segment is the name,
    /// optionally followed by `.exe`.
    pub fn is_program_name(&self, word: &str) -> bool {
        let last_segment = word
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(word);
        let stem = last_segment.strip_suffix(".exe").unwrap_or(last_segment);
        self.program_names
            .iter()
            .any(|name| name == last_segment || name == stem)
    }
}

fn word_at<S: AsRef<str>>(tokens: &[S], index: usize) -> Option<&str> {
    tokens.get(index).map(AsRef::as_ref)
}

fn normalize_cword(cword: i64, len: usize) -> Option<usize> {
    let cword = if cword < 0 {
        i64::try_from(len).ok()? - 1
    } else {
        cword
    };
    let cword = usize::try_from(cword).ok()?;
    Some(cword.min(len))
}

/// Split `--flag=value` into the flag token and whether a value was inlined
fn split_flag_token(token: &str) -> (&str, bool) {
    token
        .split_once('=')
        .map_or((token, false), |(flag, _)| (flag, true))
}

fn suggestions(node: &CommandNode, current: &str) -> Vec<String> {
    let mut matches: BTreeSet<&str> = node
        .flag_tokens()
        .filter(|token| token.starts_with(current))
        .collect();
    if !current.starts_with('-') {
        matches.extend(
            node.visible_child_names()
                .filter(|name| name.starts_with(current)),
        );
    }
    matches.into_iter().map(str::to_string).collect()
}
