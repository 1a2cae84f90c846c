//! # Transport Bindings
//!
//! The network clients that actually talk to the server live outside this
//! crate. This module defines the seam between them and the command layer:
//!
//! 1. **[`DirectConn`]**: the call-by-name convention - the verb travels as
//!    its own parameter and there is no execution context.
//! 2. **[`ContextConn`]**: the variadic convention - the verb is the first
//!    element of the argument list, every call carries a [`CallContext`] for
//!    cancellation and deadlines, and a top-level absent value is signalled
//!    with the dedicated [`TransportError::NoValue`] sentinel instead of a
//!    nil reply.
//!
//! [`DirectClient`] and [`ContextClient`] adapt one conn each onto
//! [`ExecuteCommand`], the single capability the [`crate::handler::Handler`]
//! dispatches through. Both adapters are stateless per call; the library adds
//! no retries, pipelining or framing of its own.
mod context;
mod direct;

pub use context::{CallContext, ContextClient};
pub use direct::DirectClient;

use crate::BoxError;
use crate::command::{Command, CommandArg};
use crate::reply::RawReply;

/// Errors surfaced by a transport binding.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The distinguishable "no value" sentinel of the context-style
    /// transport. The [`crate::handler::Handler`] suppresses it for the
    /// commands where an absent value is not a failure.
    #[error("no value")]
    NoValue,
    /// A server-reported error, passed through verbatim.
    #[error("{0}")]
    Server(String),
    /// The call's [`CallContext`] was cancelled.
    #[error("context cancelled")]
    Cancelled,
    /// The call's [`CallContext`] deadline passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
    /// A failure in the underlying connection.
    #[error("connection failure: '{0}'")]
    Connection(#[source] BoxError),
}

/// A call-by-name transport connection: `call(verb, args)`.
///
/// Absent values surface as [`RawReply::Nil`].
pub trait DirectConn {
    fn call(&mut self, verb: &str, args: Vec<CommandArg>) -> Result<RawReply, TransportError>;
}

/// A variadic-style transport connection with an attached execution context.
///
/// The verb arrives as the first element of `args`; a top-level absent value
/// surfaces as [`TransportError::NoValue`].
pub trait ContextConn {
    fn call(
        &mut self,
        ctx: &CallContext,
        args: Vec<CommandArg>,
    ) -> Result<RawReply, TransportError>;
}

/// The one-method capability every binding exposes to the facade.
pub trait ExecuteCommand {
    /// Dispatches a shaped command and returns the raw reply.
    fn execute(&mut self, cmd: Command) -> Result<RawReply, TransportError>;
}

impl<C: DirectConn + ?Sized> DirectConn for Box<C> {
    fn call(&mut self, verb: &str, args: Vec<CommandArg>) -> Result<RawReply, TransportError> {
        (**self).call(verb, args)
    }
}

impl<C: ContextConn + ?Sized> ContextConn for Box<C> {
    fn call(
        &mut self,
        ctx: &CallContext,
        args: Vec<CommandArg>,
    ) -> Result<RawReply, TransportError> {
        (**self).call(ctx, args)
    }
}
