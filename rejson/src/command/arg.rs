/// A single wire argument.
///
/// The protocol is positional and untyped on the wire, but every argument this
/// library emits is one of exactly three kinds: a text token (keys, paths,
/// option names), a native integer (indices, ranges, amounts), or an opaque
/// byte payload (JSON-encoded documents). Keeping the set closed lets
/// transports match exhaustively instead of asserting on runtime types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandArg {
    Str(String),
    Int(i64),
    Bytes(Vec<u8>),
}

impl CommandArg {
    /// Returns the text token, if this argument is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CommandArg::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the native integer, if this argument is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CommandArg::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the raw bytes of a payload or text argument.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            CommandArg::Str(s) => Some(s.as_bytes()),
            CommandArg::Bytes(b) => Some(b),
            CommandArg::Int(_) => None,
        }
    }
}

impl From<&str> for CommandArg {
    fn from(value: &str) -> Self {
        CommandArg::Str(value.to_string())
    }
}

impl From<String> for CommandArg {
    fn from(value: String) -> Self {
        CommandArg::Str(value)
    }
}

impl From<i64> for CommandArg {
    fn from(value: i64) -> Self {
        CommandArg::Int(value)
    }
}

impl From<Vec<u8>> for CommandArg {
    fn from(value: Vec<u8>) -> Self {
        CommandArg::Bytes(value)
    }
}
