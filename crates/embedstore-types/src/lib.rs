//! Shared domain types for embedstore.
//!
//! This crate contains the types used across the embedstore client:
//! the store configuration, the embedding record, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, uuid, secrecy, thiserror.

pub mod config;
pub mod error;
pub mod record;
