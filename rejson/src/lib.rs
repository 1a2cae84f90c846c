//! # ReJSON
//!
//! `rejson` is a client library for the JSON document command family of
//! redis-like key-value stores (`JSON.SET`, `JSON.GET`, `JSON.ARRAPPEND`, ...).
//! It turns logical method calls into the exact positional wire arguments the
//! server expects and normalizes the heterogeneous raw replies back into typed
//! results. The network transport itself is not part of this crate: calls are
//! dispatched through one of two small connection traits that any networking
//! client can implement.
//!
//! ## Key Components
//!
//! * **[`handler::Handler`]:** The main entry point. It holds the currently
//!   bound transport and exposes one method per server operation.
//! * **[`command::Command`]:** A shaped command (verb + ordered arguments).
//!   Built through per-operation constructors, usable on its own to feed raw
//!   pipelines.
//! * **[`reply::RawReply`]:** The transport-agnostic reply model every
//!   normalizer works on.
//!
//! ## Transports
//!
//! Two interchangeable bindings cover the calling conventions found in the
//! wild:
//!
//! * **[`client::DirectConn`]:** a call-by-name transport,
//!   `call(verb, args)`, with no execution context.
//! * **[`client::ContextConn`]:** a variadic-style transport that receives the
//!   verb as the first argument together with a [`client::CallContext`] for
//!   cancellation and deadlines, and signals absent values with a dedicated
//!   no-value error.
//!
//! The [`handler::Handler`] forwards every operation to whichever binding is
//! active and reports "no client configured" when none is.
//!
//! ## Re-exports
//!
//! This crate re-exports `serde_json` to ensure that consumers encode payloads
//! with a compatible version of the underlying dependency.
pub mod client;
pub mod command;
pub mod handler;
pub mod options;
pub mod reply;

// Re-exports
pub use serde_json;

/// Type alias for the standard boxed error used in generic bounds.
type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
