//! Boundary traits and session logic for embedstore.
//!
//! This crate defines the "ports" (the embedding provider and vector store
//! traits) that the infrastructure layer implements, plus the `Session` type
//! that ties them together: schema ensure, single and batch writes, and
//! scoped connection release. It depends only on `embedstore-types` -- never
//! on `embedstore-infra` or any model/database crate.

pub mod embedder;
pub mod session;
pub mod store;
