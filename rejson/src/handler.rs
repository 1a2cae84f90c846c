//! # Handler Facade
//!
//! [`Handler`] is the main entry point. It holds at most one active transport
//! binding and exposes one method per server operation. Every method checks
//! for an active binding first, shapes the command, dispatches it, and
//! normalizes the reply into the operation's typed result.
//!
//! Rebinding is the only mutation the facade performs and it is deliberately
//! unsynchronized: configure the client before use and serialize any
//! reconfiguration against in-flight calls yourself.
use crate::client::{
    CallContext, ContextClient, ContextConn, DirectClient, DirectConn, ExecuteCommand,
    TransportError,
};
use crate::command::{Command, CommandError};
use crate::options::{DebugSubcommand, GetOption, SetOption};
use crate::reply::{DebugReply, RawReply, ReplyError};
use serde::Serialize;

/// Errors surfaced by [`Handler`] operations.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("no client configured")]
    Inactive,
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Reply(#[from] ReplyError),
}

/// The facade's association with at most one transport binding.
enum ClientBinding {
    Inactive,
    Direct(DirectClient<Box<dyn DirectConn>>),
    Context(ContextClient<Box<dyn ContextConn>>),
}

/// The document-command facade.
///
/// Starts inactive; bind a transport with [`Handler::set_direct_client`] or
/// [`Handler::set_context_client`] before issuing operations.
pub struct Handler {
    binding: ClientBinding,
}

impl Handler {
    /// Creates a handler with no client configured.
    pub fn new() -> Self {
        Self {
            binding: ClientBinding::Inactive,
        }
    }

    /// Binds a call-by-name transport connection, replacing any previous
    /// binding.
    pub fn set_direct_client<C>(&mut self, conn: C)
    where
        C: DirectConn + 'static,
    {
        self.binding = ClientBinding::Direct(DirectClient::new(Box::new(conn)));
    }

    /// Binds a variadic-style transport connection with a background context,
    /// replacing any previous binding.
    pub fn set_context_client<C>(&mut self, conn: C)
    where
        C: ContextConn + 'static,
    {
        self.set_context_client_with(CallContext::background(), conn);
    }

    /// Binds a variadic-style transport connection with the given context.
    pub fn set_context_client_with<C>(&mut self, ctx: CallContext, conn: C)
    where
        C: ContextConn + 'static,
    {
        self.binding = ClientBinding::Context(ContextClient::with_context(ctx, Box::new(conn)));
    }

    /// Replaces the execution context of a context binding. Has no effect on
    /// the direct binding or on an inactive handler, since neither carries a
    /// context.
    pub fn set_context(&mut self, ctx: CallContext) {
        if let ClientBinding::Context(client) = &mut self.binding {
            client.set_context(ctx);
        }
    }

    /// Unsets any bound client, returning the handler to the inactive state.
    pub fn set_client_inactive(&mut self) {
        self.binding = ClientBinding::Inactive;
    }

    /// Returns the name of the current binding: `"inactive"`, `"direct"` or
    /// `"context"`.
    pub fn client_name(&self) -> &'static str {
        match self.binding {
            ClientBinding::Inactive => "inactive",
            ClientBinding::Direct(_) => "direct",
            ClientBinding::Context(_) => "context",
        }
    }

    fn ensure_active(&self) -> Result<(), HandlerError> {
        match self.binding {
            ClientBinding::Inactive => Err(HandlerError::Inactive),
            _ => Ok(()),
        }
    }

    fn execute(&mut self, cmd: Command) -> Result<RawReply, HandlerError> {
        match &mut self.binding {
            ClientBinding::Inactive => Err(HandlerError::Inactive),
            ClientBinding::Direct(client) => Ok(client.execute(cmd)?),
            ClientBinding::Context(client) => Ok(client.execute(cmd)?),
        }
    }

    /// Like [`Handler::execute`], but maps the transport's no-value sentinel
    /// to a nil reply. Only the operations where an absent value is not a
    /// failure use this path.
    fn execute_nil_on_no_value(&mut self, cmd: Command) -> Result<RawReply, HandlerError> {
        match self.execute(cmd) {
            Err(HandlerError::Transport(TransportError::NoValue)) => Ok(RawReply::Nil),
            other => other,
        }
    }

    /// Sets a json document at the key and path.
    ///
    /// ReJSON syntax:
    /// ```text
    /// JSON.SET <key> <path> <json>
    ///          [NX | XX]
    /// ```
    ///
    /// Returns `Some("OK")` on a write, `None` when an `NX`/`XX` condition
    /// was not met.
    pub fn json_set<T>(
        &mut self,
        key: &str,
        path: &str,
        value: &T,
        opts: &[SetOption],
    ) -> Result<Option<String>, HandlerError>
    where
        T: Serialize + ?Sized,
    {
        self.ensure_active()?;
        let cmd = Command::set(key, path, value, opts)?;
        Ok(self.execute_nil_on_no_value(cmd)?.into_optional_text()?)
    }

    /// Gets the json document at the key and path as opaque encoded text,
    /// formatted per the options. Decoding is left to the caller.
    ///
    /// ReJSON syntax:
    /// ```text
    /// JSON.GET <key>
    ///          [INDENT indentation-string]
    ///          [NEWLINE line-break-string]
    ///          [SPACE space-string]
    ///          [NOESCAPE]
    ///          <path>
    /// ```
    pub fn json_get(
        &mut self,
        key: &str,
        path: &str,
        opts: &[GetOption],
    ) -> Result<Option<Vec<u8>>, HandlerError> {
        self.ensure_active()?;
        let cmd = Command::get(key, path, opts)?;
        Ok(self.execute(cmd)?.into_optional_json_buf()?)
    }

    /// Gets the value at the shared path from each key. Absent keys yield
    /// `None` at their position, so the result length equals the key count.
    ///
    /// ReJSON syntax:
    /// ```text
    /// JSON.MGET <key> [key ...] <path>
    /// ```
    pub fn json_mget(
        &mut self,
        path: &str,
        keys: &[&str],
    ) -> Result<Vec<Option<Vec<u8>>>, HandlerError> {
        self.ensure_active()?;
        let cmd = Command::mget(path, keys)?;
        Ok(self.execute(cmd)?.into_optional_buf_list()?)
    }

    /// Deletes the value at the key and path, returning the number of values
    /// removed (0 or 1).
    ///
    /// ReJSON syntax:
    /// ```text
    /// JSON.DEL <key> <path>
    /// ```
    pub fn json_del(&mut self, key: &str, path: &str) -> Result<i64, HandlerError> {
        self.ensure_active()?;
        Ok(self.execute(Command::del(key, path))?.into_int()?)
    }

    /// Reports the type of the value at the key and path, or `None` for an
    /// absent key.
    ///
    /// ReJSON syntax:
    /// ```text
    /// JSON.TYPE <key> [path]
    /// ```
    pub fn json_type(&mut self, key: &str, path: &str) -> Result<Option<String>, HandlerError> {
        self.ensure_active()?;
        let cmd = Command::type_of(key, path);
        Ok(self.execute_nil_on_no_value(cmd)?.into_optional_text()?)
    }

    /// Increments the number at the path by `number`, returning the new value
    /// as encoded document text.
    ///
    /// ReJSON syntax:
    /// ```text
    /// JSON.NUMINCRBY <key> <path> <number>
    /// ```
    pub fn json_num_incr_by(
        &mut self,
        key: &str,
        path: &str,
        number: i64,
    ) -> Result<Vec<u8>, HandlerError> {
        self.ensure_active()?;
        let cmd = Command::num_incr_by(key, path, number);
        Ok(self.execute(cmd)?.into_json_buf()?)
    }

    /// Multiplies the number at the path by `number`, returning the new value
    /// as encoded document text.
    ///
    /// ReJSON syntax:
    /// ```text
    /// JSON.NUMMULTBY <key> <path> <number>
    /// ```
    pub fn json_num_mult_by(
        &mut self,
        key: &str,
        path: &str,
        number: i64,
    ) -> Result<Vec<u8>, HandlerError> {
        self.ensure_active()?;
        let cmd = Command::num_mult_by(key, path, number);
        Ok(self.execute(cmd)?.into_json_buf()?)
    }

    /// Appends an already-encoded json string to the string at the path,
    /// returning the new string length.
    ///
    /// ReJSON syntax:
    /// ```text
    /// JSON.STRAPPEND <key> [path] <json-string>
    /// ```
    pub fn json_str_append(
        &mut self,
        key: &str,
        path: &str,
        json_string: &str,
    ) -> Result<i64, HandlerError> {
        self.ensure_active()?;
        let cmd = Command::str_append(key, path, json_string);
        Ok(self.execute(cmd)?.into_int()?)
    }

    /// Reports the length of the string at the path.
    ///
    /// ReJSON syntax:
    /// ```text
    /// JSON.STRLEN <key> [path]
    /// ```
    pub fn json_str_len(&mut self, key: &str, path: &str) -> Result<i64, HandlerError> {
        self.ensure_active()?;
        Ok(self.execute(Command::str_len(key, path))?.into_int()?)
    }

    /// Appends values to the array at the path, returning the new array
    /// length.
    ///
    /// ReJSON syntax:
    /// ```text
    /// JSON.ARRAPPEND <key> <path> <json> [json ...]
    /// ```
    pub fn json_arr_append<T>(
        &mut self,
        key: &str,
        path: &str,
        values: &[T],
    ) -> Result<i64, HandlerError>
    where
        T: Serialize,
    {
        self.ensure_active()?;
        let cmd = Command::arr_append(key, path, values)?;
        Ok(self.execute(cmd)?.into_int()?)
    }

    /// Reports the length of the array at the path.
    ///
    /// ReJSON syntax:
    /// ```text
    /// JSON.ARRLEN <key> [path]
    /// ```
    pub fn json_arr_len(&mut self, key: &str, path: &str) -> Result<i64, HandlerError> {
        self.ensure_active()?;
        Ok(self.execute(Command::arr_len(key, path))?.into_int()?)
    }

    /// Removes and returns the element at `index` (last when `None`) as
    /// encoded document text.
    ///
    /// ReJSON syntax:
    /// ```text
    /// JSON.ARRPOP <key> [path [index]]
    /// ```
    pub fn json_arr_pop(
        &mut self,
        key: &str,
        path: &str,
        index: Option<i64>,
    ) -> Result<Vec<u8>, HandlerError> {
        self.ensure_active()?;
        let cmd = Command::arr_pop(key, path, index);
        Ok(self.execute(cmd)?.into_json_buf()?)
    }

    /// Reports the first index of the scalar in the array at the path, or -1
    /// when absent. `range` supplies 0, 1 (inclusive start) or 2 (start and
    /// exclusive stop) bounds.
    ///
    /// ReJSON syntax:
    /// ```text
    /// JSON.ARRINDEX <key> <path> <json-scalar> [start [stop]]
    /// ```
    pub fn json_arr_index<T>(
        &mut self,
        key: &str,
        path: &str,
        value: &T,
        range: &[i64],
    ) -> Result<i64, HandlerError>
    where
        T: Serialize + ?Sized,
    {
        self.ensure_active()?;
        let cmd = Command::arr_index(key, path, value, range)?;
        Ok(self.execute(cmd)?.into_int()?)
    }

    /// Trims the array at the path to the inclusive `[start, stop]` range,
    /// returning the new array length.
    ///
    /// ReJSON syntax:
    /// ```text
    /// JSON.ARRTRIM <key> <path> <start> <stop>
    /// ```
    pub fn json_arr_trim(
        &mut self,
        key: &str,
        path: &str,
        start: i64,
        stop: i64,
    ) -> Result<i64, HandlerError> {
        self.ensure_active()?;
        let cmd = Command::arr_trim(key, path, start, stop);
        Ok(self.execute(cmd)?.into_int()?)
    }

    /// Inserts values into the array at the path before `index` (shifting to
    /// the right), returning the new array length.
    ///
    /// ReJSON syntax:
    /// ```text
    /// JSON.ARRINSERT <key> <path> <index> <json> [json ...]
    /// ```
    pub fn json_arr_insert<T>(
        &mut self,
        key: &str,
        path: &str,
        index: i64,
        values: &[T],
    ) -> Result<i64, HandlerError>
    where
        T: Serialize,
    {
        self.ensure_active()?;
        let cmd = Command::arr_insert(key, path, index, values)?;
        Ok(self.execute(cmd)?.into_int()?)
    }

    /// Lists the member names of the object at the path.
    ///
    /// ReJSON syntax:
    /// ```text
    /// JSON.OBJKEYS <key> [path]
    /// ```
    pub fn json_obj_keys(&mut self, key: &str, path: &str) -> Result<Vec<String>, HandlerError> {
        self.ensure_active()?;
        Ok(self.execute(Command::obj_keys(key, path))?.into_text_list()?)
    }

    /// Reports the number of members of the object at the path.
    ///
    /// ReJSON syntax:
    /// ```text
    /// JSON.OBJLEN <key> [path]
    /// ```
    pub fn json_obj_len(&mut self, key: &str, path: &str) -> Result<i64, HandlerError> {
        self.ensure_active()?;
        Ok(self.execute(Command::obj_len(key, path))?.into_int()?)
    }

    /// Reports debug information.
    ///
    /// ReJSON syntax:
    /// ```text
    /// JSON.DEBUG <subcommand & arguments>
    ///     JSON.DEBUG MEMORY <key> [path]  - memory usage in bytes of a value
    ///     JSON.DEBUG HELP                 - a helpful message
    /// ```
    pub fn json_debug(
        &mut self,
        subcommand: DebugSubcommand,
        key: &str,
        path: &str,
    ) -> Result<DebugReply, HandlerError> {
        self.ensure_active()?;
        let reply = self.execute(Command::debug(subcommand, key, path))?;
        match subcommand {
            DebugSubcommand::Memory => Ok(DebugReply::Memory(reply.into_int()?)),
            DebugSubcommand::Help => Ok(DebugReply::Help(reply.into_text_list()?.join("\n"))),
        }
    }

    /// Deletes the value at the key and path. An alias for [`Handler::json_del`].
    ///
    /// ReJSON syntax:
    /// ```text
    /// JSON.FORGET <key> [path]
    /// ```
    pub fn json_forget(&mut self, key: &str, path: &str) -> Result<i64, HandlerError> {
        self.ensure_active()?;
        Ok(self.execute(Command::forget(key, path))?.into_int()?)
    }

    /// Returns the value at the key and path in its serialization-protocol
    /// shape, as a raw reply.
    ///
    /// ReJSON syntax:
    /// ```text
    /// JSON.RESP <key> [path]
    /// ```
    pub fn json_resp(&mut self, key: &str, path: &str) -> Result<RawReply, HandlerError> {
        self.ensure_active()?;
        self.execute(Command::resp(key, path))
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandArg;

    struct StubConn {
        reply: RawReply,
    }

    impl DirectConn for StubConn {
        fn call(
            &mut self,
            _verb: &str,
            _args: Vec<CommandArg>,
        ) -> Result<RawReply, TransportError> {
            Ok(self.reply.clone())
        }
    }

    #[test]
    fn new_handler_starts_inactive() {
        let mut handler = Handler::new();
        assert_eq!(handler.client_name(), "inactive");
        let err = handler.json_del("k", ".").unwrap_err();
        assert_eq!(err.to_string(), "no client configured");
    }

    #[test]
    fn binding_and_deactivating_tracks_the_client_name() {
        let mut handler = Handler::new();
        handler.set_direct_client(StubConn {
            reply: RawReply::Int(1),
        });
        assert_eq!(handler.client_name(), "direct");
        handler.set_client_inactive();
        assert_eq!(handler.client_name(), "inactive");
    }

    #[test]
    fn caller_usage_errors_do_not_reach_the_transport() {
        let mut handler = Handler::new();
        handler.set_direct_client(StubConn {
            reply: RawReply::Int(1),
        });
        let err = handler.json_mget(".", &[]).unwrap_err();
        assert_eq!(err.to_string(), "need at least one argument");
    }
}
