//! # Command Options
//!
//! Named optional parameters accepted by `JSON.SET`, `JSON.GET` and
//! `JSON.DEBUG`. Each option knows the literal token it contributes to the
//! wire argument list; the shaping constructors in [`crate::command`] decide
//! where those tokens land.
use crate::command::{CommandArg, CommandError};
use std::str::FromStr;

/// The output of `JSON.DEBUG HELP <key> [path]`.
pub const DEBUG_HELP_OUTPUT: &str =
    "MEMORY <key> [path] - reports memory usage\nHELP                - this message";

/// Conditional-write option for `JSON.SET`.
///
/// `Nx` writes only if the key/path does not already hold a value, `Xx` only
/// if it does. The two are mutually exclusive; a Set call accepts at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOption {
    Nx,
    Xx,
}

impl SetOption {
    /// Returns the literal wire token.
    pub fn token(self) -> &'static str {
        match self {
            SetOption::Nx => "NX",
            SetOption::Xx => "XX",
        }
    }
}

/// Formatting option for `JSON.GET`.
///
/// `Indent`, `Newline` and `Space` each contribute a token/value pair;
/// `NoEscape` contributes a bare token with no value argument. Caller order
/// is preserved on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetOption {
    Indent(String),
    Newline(String),
    Space(String),
    NoEscape,
}

impl GetOption {
    /// Returns the literal wire token.
    pub fn token(&self) -> &'static str {
        match self {
            GetOption::Indent(_) => "INDENT",
            GetOption::Newline(_) => "NEWLINE",
            GetOption::Space(_) => "SPACE",
            GetOption::NoEscape => "NOESCAPE",
        }
    }

    /// Appends this option's wire fragment: the token, then the value for the
    /// three valued options. `NoEscape` emits the token alone.
    pub(crate) fn extend_args(&self, args: &mut Vec<CommandArg>) {
        args.push(CommandArg::from(self.token()));
        match self {
            GetOption::Indent(arg) | GetOption::Newline(arg) | GetOption::Space(arg) => {
                args.push(CommandArg::from(arg.clone()));
            }
            GetOption::NoEscape => {}
        }
    }
}

/// Subcommand of `JSON.DEBUG`.
///
/// Only the two documented literals exist; parsing anything else fails before
/// shaping, so an invalid subcommand never reaches a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugSubcommand {
    /// `MEMORY` - reports the memory usage in bytes of a value.
    Memory,
    /// `HELP` - replies with the fixed help message.
    Help,
}

impl DebugSubcommand {
    /// Returns the literal wire token.
    pub fn token(self) -> &'static str {
        match self {
            DebugSubcommand::Memory => "MEMORY",
            DebugSubcommand::Help => "HELP",
        }
    }
}

impl FromStr for DebugSubcommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MEMORY" => Ok(DebugSubcommand::Memory),
            "HELP" => Ok(DebugSubcommand::Help),
            _ => Err(CommandError::UnknownDebugSubcommand),
        }
    }
}
