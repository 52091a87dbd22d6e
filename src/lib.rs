//! Describe tables once, compile dialect-correct SQL, map rows back into records.
//!
//! Backends live in their own crates (`slate-sqlite`, `slate-mysql`) and implement
//! [`Dialect`] and, when they drive a connection, [`BlockingExecutor`] or [`Executor`].
pub use slate_core::*;
