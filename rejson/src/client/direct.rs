//! The call-by-name binding.
use super::{DirectConn, ExecuteCommand, TransportError};
use crate::command::Command;
use crate::reply::RawReply;

/// Adapter binding a [`DirectConn`] to [`ExecuteCommand`].
///
/// The command splits into its verb and argument list; the conn receives them
/// as separate parameters. No execution context exists in this convention, so
/// callers get no cancellation or deadline capability through this binding.
#[derive(Debug)]
pub struct DirectClient<C> {
    conn: C,
}

impl<C: DirectConn> DirectClient<C> {
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    /// Returns the wrapped connection.
    pub fn into_inner(self) -> C {
        self.conn
    }
}

impl<C: DirectConn> ExecuteCommand for DirectClient<C> {
    fn execute(&mut self, cmd: Command) -> Result<RawReply, TransportError> {
        let (verb, args) = cmd.into_parts();
        self.conn.call(verb, args)
    }
}
