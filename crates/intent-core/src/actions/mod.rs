//! Client actions.
//!
//! Each submodule adds one family of JSON-RPC actions to [`crate::IntentClient`].

pub mod cab;
pub mod intent;
pub mod receipt;
pub mod send;
pub mod wait;
