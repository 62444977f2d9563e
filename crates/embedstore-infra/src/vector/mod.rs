//! Vector store infrastructure.
//!
//! Provides the LanceDB-backed `VectorStore` implementation and the Arrow
//! schema for the embedding collection.

pub mod lance;
pub mod schema;

pub use lance::LanceVectorStore;
