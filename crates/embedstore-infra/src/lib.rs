//! Infrastructure layer for embedstore.
//!
//! Contains implementations of the boundary traits defined in
//! `embedstore-core`: fastembed (ONNX) local embedding generation and the
//! LanceDB vector store, plus the config file loader.

pub mod config;
pub mod embedding;
pub mod vector;
