//! # Record Schema Model
//!
//! This module defines the in-memory representation of a record-oriented
//! schema: the logical shape of data as authored by users, before it is
//! lowered into a Parquet message type for columnar storage.
//!
//! ## Type System
//!
//! | Kind | Description |
//! |------|-------------|
//! | `Null` | The null type, only meaningful inside a union |
//! | `Boolean`, `Int`, `Long`, `Float`, `Double` | Scalar primitives |
//! | `Bytes`, `String` | Variable-length binary, with or without UTF-8 semantics |
//! | `Fixed` | Fixed-length binary of a declared size |
//! | `Enum` | A closed set of named symbols |
//! | `Array` | Ordered collection of a single element type |
//! | `Map` | String-keyed collection of a single value type |
//! | `Record` | Named, ordered list of typed fields |
//! | `Union` | One value out of several candidate types |
//!
//! Nullability is structural: an optional field is declared as a two-branch
//! union where one branch is [`RecordSchema::Null`].
//!
//! ## Serialization
//!
//! The model derives `serde` with externally tagged, lowercase kind names,
//! giving a stable JSON form used by the CLI and test fixtures:
//!
//! ```json
//! {
//!   "record": {
//!     "name": "user",
//!     "fields": [
//!       { "name": "id", "schema": "long" },
//!       { "name": "email", "schema": { "union": ["null", "string"] } }
//!     ]
//!   }
//! }
//! ```
//!
//! Schema values are immutable once constructed. Conversions never mutate
//! their input and allocate a fresh output tree.

use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// A node in a record-oriented schema tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSchema {
    /// The null type. Only representable in storage as a union branch.
    Null,
    /// True or false.
    Boolean,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit IEEE 754 floating point.
    Float,
    /// 64-bit IEEE 754 floating point.
    Double,
    /// Variable-length byte sequence.
    Bytes,
    /// UTF-8 encoded character sequence.
    String,
    /// Fixed-length byte sequence of exactly `size` bytes.
    Fixed {
        /// Number of bytes in every value of this type.
        size: usize,
    },
    /// A closed set of named symbols.
    Enum {
        /// The allowed symbols, in declaration order.
        symbols: Vec<String>,
    },
    /// Ordered collection of values sharing one element type.
    Array {
        /// Element type.
        items: Box<RecordSchema>,
    },
    /// Unordered string-keyed collection. Keys are implicitly strings.
    Map {
        /// Value type for every entry.
        values: Box<RecordSchema>,
    },
    /// Named record with an ordered field list.
    Record {
        /// Record name. Becomes the message name at the top level.
        name: String,
        /// Fields in declaration order.
        fields: Vec<RecordField>,
    },
    /// One value out of several candidate types, in declaration order.
    Union(Vec<RecordSchema>),
}

/// A named field inside a [`RecordSchema::Record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordField {
    /// Field name, unique within its record.
    pub name: String,
    /// The field's type.
    pub schema: RecordSchema,
}

impl RecordField {
    /// Creates a field with the given name and type.
    pub fn new(name: impl Into<String>, schema: RecordSchema) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

impl RecordSchema {
    /// Creates a record schema with the given name and fields.
    pub fn record(name: impl Into<String>, fields: Vec<RecordField>) -> Self {
        Self::Record {
            name: name.into(),
            fields,
        }
    }

    /// Creates an array schema over the given element type.
    pub fn array(items: RecordSchema) -> Self {
        Self::Array {
            items: Box::new(items),
        }
    }

    /// Creates a string-keyed map schema over the given value type.
    pub fn map(values: RecordSchema) -> Self {
        Self::Map {
            values: Box::new(values),
        }
    }

    /// Wraps a schema in the two-branch union `[null, schema]` that marks a
    /// value as optional.
    pub fn nullable(schema: RecordSchema) -> Self {
        Self::Union(vec![Self::Null, schema])
    }

    /// Returns true for the [`RecordSchema::Null`] node.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The lowercase name of this node's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bytes => "bytes",
            Self::String => "string",
            Self::Fixed { .. } => "fixed",
            Self::Enum { .. } => "enum",
            Self::Array { .. } => "array",
            Self::Map { .. } => "map",
            Self::Record { .. } => "record",
            Self::Union(_) => "union",
        }
    }
}
