//! Command tree used by shell completion.
//!
//! The resolver never looks at clap directly. Command definitions are first
//! described with [`CommandSpec`] and [`FlagSpec`] (either by hand or with
//! [`from_clap`]) and then materialized into an immutable [`CommandNode`]
//! whose children and flags are keyed by every token they answer to.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while materializing a command tree
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("subcommand of `{parent}` has an empty name")]
    UnnamedCommand { parent: String },

    #[error("flag on `{command}` has neither a long nor a short name")]
    UnnamedFlag { command: String },

    #[error("flag token `{token}` on `{command}` can never be completed")]
    InvalidFlagToken { command: String, token: String },
}

/// How a boolean flag can be switched off
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Negation {
    /// No negated form
    #[default]
    None,
    /// `--no-<name>`
    Prefixed,
    /// `--<custom>`
    Custom(String),
}

/// Declarative description of a single flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    pub name: String,
    pub aliases: Vec<String>,
    pub short: Option<char>,
    pub takes_value: bool,
    pub negation: Negation,
    pub hidden: bool,
    pub global: bool,
}

impl FlagSpec {
    /// A boolean long flag named `name` (without the leading dashes)
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            short: None,
            takes_value: false,
            negation: Negation::None,
            hidden: false,
            global: false,
        }
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    #[must_use]
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Mark the flag as consuming the following token as its value
    #[must_use]
    pub fn takes_value(mut self) -> Self {
        self.takes_value = true;
        self
    }

    /// Register `--no-<name>` alongside the flag
    #[must_use]
    pub fn negatable(mut self) -> Self {
        self.negation = Negation::Prefixed;
        self
    }

    /// Register `--<negated>` as the negated form
    #[must_use]
    pub fn negated_as(mut self, negated: impl Into<String>) -> Self {
        self.negation = Negation::Custom(negated.into());
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Make the flag valid on every descendant of the declaring command
    #[must_use]
    pub fn global(mut self) -> Self {
        self.global = true;
        self
    }

    /// Every token this flag answers to, canonical long form first
    ///
    /// Empty names and aliases are skipped. The negated form never takes a value.
    pub fn tokens(&self) -> Vec<(String, bool)> {
        let mut tokens = Vec::with_capacity(self.aliases.len() + 3);
        if !self.name.is_empty() {
            tokens.push((format!("--{}", self.name), self.takes_value));
        }
        for alias in self.aliases.iter().filter(|alias| !alias.is_empty()) {
            tokens.push((format!("--{alias}"), self.takes_value));
        }
        if let Some(short) = self.short {
            tokens.push((format!("-{short}"), self.takes_value));
        }
        if let Some(negated) = self.negated_token() {
            tokens.push((negated, false));
        }
        tokens
    }

    fn negated_token(&self) -> Option<String> {
        match &self.negation {
            Negation::None => None,
            Negation::Prefixed if self.name.is_empty() => None,
            Negation::Prefixed => Some(format!("--no-{}", self.name)),
            Negation::Custom(custom) if custom.is_empty() => None,
            Negation::Custom(custom) => Some(format!("--{custom}")),
        }
    }
}

/// Declarative description of a command and its subcommands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: String,
    pub aliases: Vec<String>,
    pub hidden: bool,
    pub flags: Vec<FlagSpec>,
    pub subcommands: Vec<CommandSpec>,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            hidden: false,
            flags: Vec::new(),
            subcommands: Vec::new(),
        }
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    #[must_use]
    pub fn flag(mut self, flag: FlagSpec) -> Self {
        self.flags.push(flag);
        self
    }

    #[must_use]
    pub fn subcommand(mut self, subcommand: Self) -> Self {
        self.subcommands.push(subcommand);
        self
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .filter(|name| !name.is_empty())
    }
}

/// Arity information for a registered flag token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagArity {
    pub takes_value: bool,
}

/// Immutable node of a built command tree
///
/// Child nodes are shared between all of their aliases, so a node reached via
/// `rm` is the same allocation as the one reached via `remove`.
#[derive(Debug, Clone, Default)]
pub struct CommandNode {
    hidden: bool,
    children: BTreeMap<String, Arc<CommandNode>>,
    flags: BTreeMap<String, FlagArity>,
}

impl CommandNode {
    /// Materialize `spec` into a tree
    ///
    /// Global flags apply to every descendant of the command declaring them.
    /// When two entries claim the same token the first one registered wins; a
    /// command's own flags are registered before the ones it inherits, and
    /// visible children before hidden ones.
    pub fn build(spec: &CommandSpec) -> Result<Self, BuildError> {
        Self::build_with_inherited(spec, &[])
    }

    fn build_with_inherited(spec: &CommandSpec, inherited: &[FlagSpec]) -> Result<Self, BuildError> {
        let mut node = Self {
            hidden: spec.hidden,
            ..Self::default()
        };

        for flag in &spec.flags {
            validate_flag(&spec.name, flag)?;
        }

        for flag in spec.flags.iter().chain(inherited).filter(|flag| !flag.hidden) {
            for (token, takes_value) in flag.tokens() {
                if let Entry::Vacant(slot) = node.flags.entry(token) {
                    slot.insert(FlagArity { takes_value });
                }
            }
        }

        let mut scope: Vec<FlagSpec> = spec.flags.iter().filter(|flag| flag.global).cloned().collect();
        scope.extend_from_slice(inherited);

        let visible = spec.subcommands.iter().filter(|child| !child.hidden);
        let hidden = spec.subcommands.iter().filter(|child| child.hidden);
        for child in visible.chain(hidden) {
            if child.name.is_empty() {
                return Err(BuildError::UnnamedCommand {
                    parent: spec.name.clone(),
                });
            }
            let built = Arc::new(Self::build_with_inherited(child, &scope)?);
            for name in child.names() {
                if let Entry::Vacant(slot) = node.children.entry(name.to_string()) {
                    slot.insert(Arc::clone(&built));
                }
            }
        }

        Ok(node)
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Look up a child by exact name or alias
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.get(name).map(AsRef::as_ref)
    }

    /// Look up a flag by exact token (`--name`, `--alias`, `-x`, `--no-name`)
    pub fn flag(&self, token: &str) -> Option<FlagArity> {
        self.flags.get(token).copied()
    }

    /// Child names and aliases of non-hidden children, in ascending order
    pub fn visible_child_names(&self) -> impl Iterator<Item = &str> {
        self.children
            .iter()
            .filter(|(_, child)| !child.hidden)
            .map(|(name, _)| name.as_str())
    }

    /// Every registered flag token, in ascending order
    pub fn flag_tokens(&self) -> impl Iterator<Item = &str> {
        self.flags.keys().map(String::as_str)
    }
}

fn validate_flag(command: &str, flag: &FlagSpec) -> Result<(), BuildError> {
    if flag.name.is_empty() && flag.short.is_none() {
        return Err(BuildError::UnnamedFlag {
            command: command.to_string(),
        });
    }
    for (token, _) in flag.tokens() {
        let malformed = token == "-"
            || token == "--"
            || token.contains('=')
            || token.chars().any(char::is_whitespace);
        if malformed {
            return Err(BuildError::InvalidFlagToken {
                command: command.to_string(),
                token,
            });
        }
    }
    Ok(())
}

/// Describe a clap command tree as a [`CommandSpec`]
///
/// The command is built first so that generated `--help`/`--version` flags
/// are present and clap has already copied global arguments into every
/// subcommand; the resulting flags are therefore never marked global here.
pub fn from_clap(command: &clap::Command) -> Result<CommandSpec, BuildError> {
    let mut command = command.clone();
    command.build();
    describe_clap(&command)
}

fn describe_clap(command: &clap::Command) -> Result<CommandSpec, BuildError> {
    let mut spec = CommandSpec::new(command.get_name());
    spec.hidden = command.is_hide_set();
    spec.aliases = command.get_all_aliases().map(str::to_string).collect();

    for arg in command.get_arguments() {
        if arg.is_positional() || arg.is_hide_set() {
            continue;
        }
        let mut flag = FlagSpec::new(arg.get_long().unwrap_or_default());
        flag.short = arg.get_short();
        flag.takes_value = arg.get_action().takes_values();
        if let Some(aliases) = arg.get_all_aliases() {
            flag.aliases = aliases.into_iter().map(str::to_string).collect();
        }
        spec.flags.push(flag);
    }

    for subcommand in command.get_subcommands() {
        if subcommand.get_name().is_empty() {
            return Err(BuildError::UnnamedCommand {
                parent: spec.name.clone(),
            });
        }
        spec.subcommands.push(describe_clap(subcommand)?);
    }

    Ok(spec)
}
