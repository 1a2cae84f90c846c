//! # Command Registry & Shaping
//!
//! This module maps every logical operation onto the wire command the server
//! understands. Each operation has a stable [`CommandId`], one protocol verb,
//! and one shaping constructor on [`Command`] that validates the caller's
//! arguments and emits them in the exact positional order the protocol
//! mandates (key, then path, then payload, then trailing options — except
//! `JSON.GET`, whose options precede the path).
//!
//! The id → verb registry is a plain `match`: it is built into the binary,
//! immutable, and exhaustive over the enum. The only way to hold an
//! unregistered id is the numeric boundary, where [`CommandId::try_from`]
//! rejects out-of-range values.
//!
//! Shaped commands are ordinary values. The [`handler::Handler`] builds and
//! dispatches them internally, but they can also be built directly and handed
//! to a raw connection, which is useful when mixing document commands with
//! other operations in a MULTI/EXEC pipeline:
//!
//! ```
//! use rejson::command::{Command, CommandArg};
//!
//! # fn main() -> Result<(), rejson::command::CommandError> {
//! let cmd = Command::set("user:1", ".", &serde_json::json!({"name": "Ada"}), &[])?;
//! let (verb, args) = cmd.into_parts();
//! assert_eq!(verb, "JSON.SET");
//! assert_eq!(args[0], CommandArg::from("user:1"));
//! # Ok(())
//! # }
//! ```
//!
//! [`handler::Handler`]: crate::handler::Handler
mod arg;
mod shape;

pub use arg::CommandArg;

/// Errors raised while shaping a command, before anything reaches a transport.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("command not supported")]
    UnsupportedCommand,
    #[error("too many optional arguments")]
    TooManyOptionals,
    #[error("need at least one argument")]
    NeedAtLeastOneArg,
    #[error("unknown subcommand - try `JSON.DEBUG HELP`")]
    UnknownDebugSubcommand,
    #[error("failed to encode value as JSON: '{0}'")]
    Encode(#[from] serde_json::Error),
}

/// Identifier of a server operation.
///
/// Every id carries exactly one protocol verb, returned by [`CommandId::verb`].
/// The numeric values are stable (0..=19) so ids can cross process boundaries;
/// [`CommandId::try_from`] is the checked way back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum CommandId {
    Set = 0,
    Get = 1,
    Del = 2,
    MGet = 3,
    Type = 4,
    NumIncrBy = 5,
    NumMultBy = 6,
    StrAppend = 7,
    StrLen = 8,
    ArrAppend = 9,
    ArrLen = 10,
    ArrPop = 11,
    ArrIndex = 12,
    ArrTrim = 13,
    ArrInsert = 14,
    ObjKeys = 15,
    ObjLen = 16,
    Debug = 17,
    Forget = 18,
    Resp = 19,
}

impl CommandId {
    /// Returns the literal protocol verb for this operation.
    pub fn verb(self) -> &'static str {
        match self {
            CommandId::Set => "JSON.SET",
            CommandId::Get => "JSON.GET",
            CommandId::Del => "JSON.DEL",
            CommandId::MGet => "JSON.MGET",
            CommandId::Type => "JSON.TYPE",
            CommandId::NumIncrBy => "JSON.NUMINCRBY",
            CommandId::NumMultBy => "JSON.NUMMULTBY",
            CommandId::StrAppend => "JSON.STRAPPEND",
            CommandId::StrLen => "JSON.STRLEN",
            CommandId::ArrAppend => "JSON.ARRAPPEND",
            CommandId::ArrLen => "JSON.ARRLEN",
            CommandId::ArrPop => "JSON.ARRPOP",
            CommandId::ArrIndex => "JSON.ARRINDEX",
            CommandId::ArrTrim => "JSON.ARRTRIM",
            CommandId::ArrInsert => "JSON.ARRINSERT",
            CommandId::ObjKeys => "JSON.OBJKEYS",
            CommandId::ObjLen => "JSON.OBJLEN",
            CommandId::Debug => "JSON.DEBUG",
            CommandId::Forget => "JSON.FORGET",
            CommandId::Resp => "JSON.RESP",
        }
    }

    /// Returns the stable numeric value of this id.
    pub fn value(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for CommandId {
    type Error = CommandError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        let id = match value {
            0 => CommandId::Set,
            1 => CommandId::Get,
            2 => CommandId::Del,
            3 => CommandId::MGet,
            4 => CommandId::Type,
            5 => CommandId::NumIncrBy,
            6 => CommandId::NumMultBy,
            7 => CommandId::StrAppend,
            8 => CommandId::StrLen,
            9 => CommandId::ArrAppend,
            10 => CommandId::ArrLen,
            11 => CommandId::ArrPop,
            12 => CommandId::ArrIndex,
            13 => CommandId::ArrTrim,
            14 => CommandId::ArrInsert,
            15 => CommandId::ObjKeys,
            16 => CommandId::ObjLen,
            17 => CommandId::Debug,
            18 => CommandId::Forget,
            19 => CommandId::Resp,
            _ => return Err(CommandError::UnsupportedCommand),
        };
        Ok(id)
    }
}

/// A fully shaped command: an operation id plus the ordered wire arguments.
///
/// Instances are produced by the per-operation constructors in this module
/// (see [`Command::set`], [`Command::get`], ...). The verb is derived from the
/// id, never stored, so a `Command` can not disagree with the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    id: CommandId,
    args: Vec<CommandArg>,
}

impl Command {
    /// Returns the operation id.
    pub fn id(&self) -> CommandId {
        self.id
    }

    /// Returns the protocol verb.
    pub fn verb(&self) -> &'static str {
        self.id.verb()
    }

    /// Returns the shaped wire arguments, in emission order.
    pub fn args(&self) -> &[CommandArg] {
        &self.args
    }

    /// Splits the command into its verb and arguments, consuming it.
    pub fn into_parts(self) -> (&'static str, Vec<CommandArg>) {
        (self.id.verb(), self.args)
    }
}
