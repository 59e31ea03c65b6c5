//! # Schema Conversion
//!
//! Bidirectional, order-preserving translation between the record schema
//! model and Parquet message types.
//!
//! - [`to_parquet_schema`] lowers a [`RecordSchema`](crate::model::RecordSchema)
//!   record into a Parquet message type for columnar storage.
//! - [`to_record_schema`] reconstructs a record schema from a stored Parquet
//!   message type.
//!
//! Both directions are pure functions over immutable trees. The forward
//! direction is total for every record schema except unions with no non-null
//! branch and null outside a union. The backward direction is exact for
//! schemas produced by the forward direction; enum symbol lists and the
//! original names of multi-branch union members are not recoverable from
//! Parquet metadata.

mod to_parquet;
mod to_record;


pub use to_parquet::to_parquet_schema;
pub use to_record::to_record_schema;

/// Maximum schema nesting depth accepted by either conversion direction.
///
/// Real schemas nest a handful of levels; the cap exists so pathological
/// input fails with [`ConversionError::NestingTooDeep`] instead of
/// overflowing the call stack.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Errors raised by schema conversion.
///
/// Every variant is a deterministic, structural property of the input
/// schema. Conversion either succeeds with a complete output tree or fails
/// with one of these; no partial results are produced.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// The top-level record schema node is not a record.
    #[error("top-level schema must be a record, found {found}")]
    TopLevelNotRecord {
        /// Kind of the offending node.
        found: &'static str,
    },

    /// The top-level Parquet node is not a group.
    #[error("top-level Parquet type must be a message group, found primitive '{name}'")]
    TopLevelNotGroup {
        /// Name of the offending primitive field.
        name: String,
    },

    /// A null type appeared outside a union; it has no columnar encoding.
    #[error("field '{field}': null is only representable as a union branch")]
    BareNull {
        /// Name of the offending field.
        field: String,
    },

    /// A union with no non-null branch cannot hold a value.
    #[error("field '{field}': union has no non-null branch")]
    EmptyUnion {
        /// Name of the offending field.
        field: String,
    },

    /// Map keys must be UTF-8 strings in the record model.
    #[error("map '{group}': key type must be binary (UTF8), found {found}")]
    NonStringMapKey {
        /// Name of the map group.
        group: String,
        /// Description of the key type that was found.
        found: String,
    },

    /// A LIST group does not contain the expected single element field.
    #[error("list '{group}': {detail}")]
    MalformedList {
        /// Name of the list group.
        group: String,
        /// What was wrong with its shape.
        detail: String,
    },

    /// A MAP group does not contain the expected key/value pair group.
    #[error("map '{group}': {detail}")]
    MalformedMap {
        /// Name of the map group.
        group: String,
        /// What was wrong with its shape.
        detail: String,
    },

    /// A repeated field occurred outside a LIST or MAP wrapper group.
    #[error("field '{field}': repeated fields are only valid inside LIST or MAP groups")]
    StrayRepeated {
        /// Name of the offending field.
        field: String,
    },

    /// A non-root field carries no repetition marker.
    #[error("field '{field}': missing repetition marker")]
    MissingRepetition {
        /// Name of the offending field.
        field: String,
    },

    /// The Parquet type has no counterpart in the record model.
    #[error("field '{field}': unsupported Parquet type, {detail}")]
    Unsupported {
        /// Name of the offending field.
        field: String,
        /// Description of the unsupported construct.
        detail: String,
    },

    /// The schema nests deeper than [`MAX_NESTING_DEPTH`] levels.
    #[error("schema nesting exceeds {limit} levels")]
    NestingTooDeep {
        /// The configured depth limit.
        limit: usize,
    },

    /// The Parquet type builder rejected a constructed field.
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}
