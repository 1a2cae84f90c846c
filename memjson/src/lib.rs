//! # memjson
//!
//! An in-memory JSON document store speaking the `JSON.*` wire command
//! family, used by the `rejson` integration tests in place of a real server.
//! It evaluates every verb the library emits with server-faithful semantics
//! and exposes one connection per transport flavor:
//!
//! * [`MemJson::direct`] - the call-by-name convention; text replies arrive
//!   as byte buffers and absent values as nil replies.
//! * [`MemJson::contextual`] - the variadic convention; text replies arrive
//!   as native strings, the attached context is honored, and a top-level
//!   absent value becomes the dedicated no-value error.
//!
//! The store handle is cheap to clone; all connections created from one
//! handle share the same keyspace.
mod store;

use rejson::client::{CallContext, ContextConn, DirectConn, TransportError};
use rejson::command::CommandArg;
use rejson::reply::RawReply;
use std::sync::{Arc, Mutex};
use store::{Outcome, Store};

/// A shared in-memory document store.
#[derive(Clone, Default)]
pub struct MemJson {
    store: Arc<Mutex<Store>>,
}

impl MemJson {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a call-by-name connection into this store.
    pub fn direct(&self) -> DirectMemConn {
        DirectMemConn {
            store: Arc::clone(&self.store),
        }
    }

    /// Returns a variadic-style connection into this store.
    pub fn contextual(&self) -> ContextMemConn {
        ContextMemConn {
            store: Arc::clone(&self.store),
        }
    }
}

/// The call-by-name flavor: separate verb parameter, text as byte buffers.
pub struct DirectMemConn {
    store: Arc<Mutex<Store>>,
}

impl DirectConn for DirectMemConn {
    fn call(&mut self, verb: &str, args: Vec<CommandArg>) -> Result<RawReply, TransportError> {
        let mut store = lock(&self.store)?;
        let outcome = store
            .dispatch(verb, &args)
            .map_err(|err| TransportError::Server(err.to_string()))?;
        Ok(as_data_reply(outcome))
    }
}

/// The variadic flavor: verb as the first argument, text as native strings,
/// top-level nil as the no-value sentinel.
pub struct ContextMemConn {
    store: Arc<Mutex<Store>>,
}

impl ContextConn for ContextMemConn {
    fn call(
        &mut self,
        ctx: &CallContext,
        args: Vec<CommandArg>,
    ) -> Result<RawReply, TransportError> {
        ctx.check()?;
        let verb = args
            .first()
            .and_then(CommandArg::as_str)
            .ok_or_else(|| TransportError::Server("ERR missing command verb".to_string()))?
            .to_string();

        let mut store = lock(&self.store)?;
        let outcome = store
            .dispatch(&verb, &args[1..])
            .map_err(|err| TransportError::Server(err.to_string()))?;
        match as_simple_reply(outcome) {
            RawReply::Nil => Err(TransportError::NoValue),
            reply => Ok(reply),
        }
    }
}

fn lock(store: &Arc<Mutex<Store>>) -> Result<std::sync::MutexGuard<'_, Store>, TransportError> {
    store
        .lock()
        .map_err(|_| TransportError::Connection("store mutex poisoned".into()))
}

fn as_data_reply(outcome: Outcome) -> RawReply {
    match outcome {
        Outcome::Nil => RawReply::Nil,
        Outcome::Int(n) => RawReply::Int(n),
        Outcome::Text(text) => RawReply::Data(text.into_bytes()),
        Outcome::List(items) => RawReply::Array(items.into_iter().map(as_data_reply).collect()),
    }
}

fn as_simple_reply(outcome: Outcome) -> RawReply {
    match outcome {
        Outcome::Nil => RawReply::Nil,
        Outcome::Int(n) => RawReply::Int(n),
        Outcome::Text(text) => RawReply::Simple(text),
        Outcome::List(items) => RawReply::Array(items.into_iter().map(as_simple_reply).collect()),
    }
}
