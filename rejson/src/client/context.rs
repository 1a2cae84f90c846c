//! The variadic binding and its execution context.
use super::{ContextConn, ExecuteCommand, TransportError};
use crate::command::{Command, CommandArg};
use crate::reply::RawReply;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// A cancellation/deadline token attached to every call through a
/// [`ContextClient`].
///
/// Clones share the cancel flag, so a context handed to the client can still
/// be cancelled from the caller's side. The deadline is fixed at
/// construction.
#[derive(Debug, Clone)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl CallContext {
    /// A context that never expires and starts uncancelled.
    pub fn background() -> Self {
        Self {
            deadline: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A context expiring `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// A context expiring at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Cancels this context and every clone sharing its flag.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline; `None` when no deadline is set.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Fails if this context is cancelled or past its deadline.
    pub fn check(&self) -> Result<(), TransportError> {
        if self.is_cancelled() {
            return Err(TransportError::Cancelled);
        }
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            return Err(TransportError::DeadlineExceeded);
        }
        Ok(())
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::background()
    }
}

/// Adapter binding a [`ContextConn`] to [`ExecuteCommand`].
///
/// The verb is prepended into the argument list, matching the variadic
/// calling convention. The attached [`CallContext`] is checked before the
/// conn is reached and then handed to it, so the transport can honor the
/// deadline during the network call as well.
#[derive(Debug)]
pub struct ContextClient<C> {
    conn: C,
    ctx: CallContext,
}

impl<C: ContextConn> ContextClient<C> {
    /// Wraps `conn` with a background context.
    pub fn new(conn: C) -> Self {
        Self::with_context(CallContext::background(), conn)
    }

    /// Wraps `conn` with the given context.
    pub fn with_context(ctx: CallContext, conn: C) -> Self {
        Self { conn, ctx }
    }

    /// Replaces the attached context for subsequent calls.
    pub fn set_context(&mut self, ctx: CallContext) {
        self.ctx = ctx;
    }

    pub fn context(&self) -> &CallContext {
        &self.ctx
    }

    /// Returns the wrapped connection.
    pub fn into_inner(self) -> C {
        self.conn
    }
}

impl<C: ContextConn> ExecuteCommand for ContextClient<C> {
    fn execute(&mut self, cmd: Command) -> Result<RawReply, TransportError> {
        self.ctx.check()?;
        let (verb, args) = cmd.into_parts();
        let mut full = Vec::with_capacity(args.len() + 1);
        full.push(CommandArg::from(verb));
        full.extend(args);
        self.conn.call(&self.ctx, full)
    }
}
