//! Embedding provider implementations.

pub mod fastembed;

pub use fastembed::FastEmbedder;
