//! # recolumn - Record Schemas for Columnar Storage
//!
//! `recolumn` translates between a record-oriented schema model (records,
//! enums, unions, arrays, maps, primitives) and Apache Parquet message
//! types, so data whose logical shape is authored in the record model can be
//! persisted in a columnar layout and read back.
//!
//! ## Key Features
//!
//! - **Bidirectional**: [`convert::to_parquet_schema`] lowers a record
//!   schema into a Parquet message type; [`convert::to_record_schema`]
//!   reconstructs a record schema from stored Parquet metadata.
//!
//! - **Order Preserving**: record field order equals the declared column
//!   order of the converted group, in both directions.
//!
//! - **Structural Nullability**: a `[null, T]` union becomes an `optional`
//!   field, and comes back as the same union. Multi-branch unions are
//!   encoded as a group of optional, positionally named members.
//!
//! - **Loud Failures**: shapes without a counterpart in the other model
//!   (non-record top level, maps with non-string keys, malformed collection
//!   groups) fail with [`convert::ConversionError`] instead of degrading to
//!   a best-effort guess.
//!
//! ## Quick Start
//!
//! ```
//! use recolumn::convert::{to_parquet_schema, to_record_schema};
//! use recolumn::model::{RecordField, RecordSchema};
//!
//! let schema = RecordSchema::record(
//!     "user",
//!     vec![
//!         RecordField::new("id", RecordSchema::Long),
//!         RecordField::new("email", RecordSchema::nullable(RecordSchema::String)),
//!         RecordField::new("tags", RecordSchema::array(RecordSchema::String)),
//!     ],
//! );
//!
//! // Lower to a Parquet message type for the storage layer.
//! let message = to_parquet_schema(&schema)?;
//! assert_eq!(message.name(), "user");
//!
//! // Reading the stored metadata back yields the same logical shape.
//! let restored = to_record_schema(&message)?;
//! assert_eq!(restored, schema);
//! # Ok::<(), recolumn::convert::ConversionError>(())
//! ```
//!
//! ## What Is Not Preserved
//!
//! Parquet metadata keeps no enum symbol lists, so enums reconstruct with an
//! empty symbol list. Multi-branch union members come back under their
//! positional `member<i>` names. Documentation strings, defaults, and custom
//! attributes of the record model are not carried into the columnar schema.
//!
//! ## Architecture
//!
//! - [`model`]: the record-oriented schema model and its JSON form
//! - [`convert`]: the conversion pair and its error type

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod convert;
pub mod model;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::convert::{to_parquet_schema, to_record_schema, ConversionError};
    pub use crate::model::{RecordField, RecordSchema};
}
