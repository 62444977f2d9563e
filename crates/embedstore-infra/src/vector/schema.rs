//! Arrow schema for the embedding collection.
//!
//! Exactly two text properties (`text`, `text_id`) plus a fixed-size
//! float32 vector column whose length is the embedding model's dimension.
//! Vectors are always supplied externally; the store never computes them.
//!
//! Arrow versions MUST match lancedb's transitive dependency (57.3 for
//! lancedb 0.26).

use std::sync::Arc;

use arrow_schema::{DataType, Field, Schema};

/// Schema for the text-embedding collection.
pub fn collection_schema(dimension: i32) -> Schema {
    Schema::new(vec![
        Field::new("text", DataType::Utf8, false),
        Field::new("text_id", DataType::Utf8, false),
        Field::new(
            "vector",
            DataType::FixedSizeList(
                Arc::new(Field::new("item", DataType::Float32, true)),
                dimension,
            ),
            false,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_schema_has_correct_fields() {
        let schema = collection_schema(384);
        assert_eq!(schema.fields().len(), 3);
        assert!(schema.field_with_name("text").is_ok());
        assert!(schema.field_with_name("text_id").is_ok());

        let vector_field = schema.field_with_name("vector").unwrap();
        match vector_field.data_type() {
            DataType::FixedSizeList(_, size) => assert_eq!(*size, 384),
            other => panic!("Expected FixedSizeList, got {:?}", other),
        }
    }

    #[test]
    fn test_dimension_follows_the_model() {
        let schema = collection_schema(768);
        match schema.field_with_name("vector").unwrap().data_type() {
            DataType::FixedSizeList(_, size) => assert_eq!(*size, 768),
            other => panic!("Expected FixedSizeList, got {:?}", other),
        }
    }
}
