//! Common types module for the intent client.
//!
//! This module defines the data types shared by every crate in the workspace:
//! the gasless cross-chain order, the request and response shapes of the
//! intent and relayer services, and the protocol constants both sides of the
//! wire must agree on.

/// RPC request and response types for the intent and relayer services.
pub mod api;
/// Order types including the gasless cross-chain order and intent versions.
pub mod order;
/// Receipt and status types returned by the relayer.
pub mod receipt;
/// Secure string type for private keys.
pub mod secret_string;
/// Utility functions, EIP-712 helpers and protocol constants.
pub mod utils;

// Re-export all types for convenient access
pub use api::*;
pub use order::*;
pub use receipt::*;
pub use secret_string::SecretString;
pub use utils::truncate_id;

pub use alloy_primitives::{Address, Bytes, B256, U256};
