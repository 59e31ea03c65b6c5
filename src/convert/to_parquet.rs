//! Lowering of record schemas into Parquet message types.
//!
//! ## Mapping
//!
//! | Record type | Parquet field |
//! |-------------|---------------|
//! | boolean | `boolean` |
//! | int | `int32` |
//! | long | `int64` |
//! | float | `float` |
//! | double | `double` |
//! | bytes | `binary` |
//! | string | `binary (UTF8)` |
//! | fixed(n) | `fixed_len_byte_array(n)` |
//! | enum | `binary (ENUM)` |
//! | record | `group` with converted fields |
//! | array | `group (LIST)` with one repeated `array` field |
//! | map | `group (MAP)` with a repeated `map (MAP_KEY_VALUE)` entry group |
//! | union | collapsed to `optional`, or a group of `member<i>` fields |
//!
//! Fields are `required` unless a union with a null branch makes them
//! `optional`. Field order is preserved.

use std::sync::Arc;

use parquet::basic::{ConvertedType, Repetition, Type as PhysicalType};
use parquet::schema::types::{Type, TypePtr};

use crate::model::{RecordField, RecordSchema};

use super::{ConversionError, MAX_NESTING_DEPTH};

/// Converts a record schema into an equivalent Parquet message type.
///
/// The input must be a [`RecordSchema::Record`]; its name becomes the
/// message name and its fields become the message's columns in declaration
/// order. The input is not modified.
///
/// # Errors
///
/// Returns [`ConversionError::TopLevelNotRecord`] for a non-record input,
/// and the per-field errors documented on [`ConversionError`] for unions
/// without a non-null branch, null outside a union, or excessive nesting.
///
/// # Example
///
/// ```
/// use recolumn::convert::to_parquet_schema;
/// use recolumn::model::{RecordField, RecordSchema};
///
/// let schema = RecordSchema::record(
///     "user",
///     vec![
///         RecordField::new("id", RecordSchema::Long),
///         RecordField::new("email", RecordSchema::nullable(RecordSchema::String)),
///     ],
/// );
///
/// let message = to_parquet_schema(&schema)?;
/// assert_eq!(message.name(), "user");
/// assert_eq!(message.get_fields().len(), 2);
/// # Ok::<(), recolumn::convert::ConversionError>(())
/// ```
pub fn to_parquet_schema(schema: &RecordSchema) -> Result<Type, ConversionError> {
    match schema {
        RecordSchema::Record { name, fields } => {
            let children = convert_fields(fields, 0)?;
            Ok(Type::group_type_builder(name)
                .with_fields(children)
                .build()?)
        }
        other => Err(ConversionError::TopLevelNotRecord {
            found: other.kind_name(),
        }),
    }
}

fn convert_fields(fields: &[RecordField], depth: usize) -> Result<Vec<TypePtr>, ConversionError> {
    fields
        .iter()
        .map(|field| {
            convert_field(&field.name, &field.schema, Repetition::REQUIRED, depth).map(Arc::new)
        })
        .collect()
}

/// Converts one field. `repetition` is the caller's default and is
/// overridden to `optional` by a union with a null branch.
fn convert_field(
    name: &str,
    schema: &RecordSchema,
    repetition: Repetition,
    depth: usize,
) -> Result<Type, ConversionError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(ConversionError::NestingTooDeep {
            limit: MAX_NESTING_DEPTH,
        });
    }

    match schema {
        RecordSchema::Null => Err(ConversionError::BareNull {
            field: name.to_string(),
        }),
        RecordSchema::Boolean => primitive(name, PhysicalType::BOOLEAN, repetition),
        RecordSchema::Int => primitive(name, PhysicalType::INT32, repetition),
        RecordSchema::Long => primitive(name, PhysicalType::INT64, repetition),
        RecordSchema::Float => primitive(name, PhysicalType::FLOAT, repetition),
        RecordSchema::Double => primitive(name, PhysicalType::DOUBLE, repetition),
        RecordSchema::Bytes => primitive(name, PhysicalType::BYTE_ARRAY, repetition),
        RecordSchema::String => annotated(name, ConvertedType::UTF8, repetition),
        RecordSchema::Enum { .. } => annotated(name, ConvertedType::ENUM, repetition),
        RecordSchema::Fixed { size } => {
            let length = i32::try_from(*size).map_err(|_| ConversionError::Unsupported {
                field: name.to_string(),
                detail: format!("fixed size {size} exceeds the Parquet length range"),
            })?;
            Ok(
                Type::primitive_type_builder(name, PhysicalType::FIXED_LEN_BYTE_ARRAY)
                    .with_repetition(repetition)
                    .with_length(length)
                    .build()?,
            )
        }
        RecordSchema::Record { fields, .. } => {
            // A nested record is addressed by its field name, not the
            // record's own name.
            let children = convert_fields(fields, depth + 1)?;
            Ok(Type::group_type_builder(name)
                .with_repetition(repetition)
                .with_fields(children)
                .build()?)
        }
        RecordSchema::Array { items } => {
            // The element is repeated unless a nullable union downgrades it
            // to optional inside the list.
            let element = convert_field("array", items, Repetition::REPEATED, depth + 1)?;
            Ok(Type::group_type_builder(name)
                .with_repetition(repetition)
                .with_converted_type(ConvertedType::LIST)
                .with_fields(vec![Arc::new(element)])
                .build()?)
        }
        RecordSchema::Map { values } => {
            let key = annotated("key", ConvertedType::UTF8, Repetition::REQUIRED)?;
            let value = convert_field("value", values, Repetition::REQUIRED, depth + 1)?;
            let entries = Type::group_type_builder("map")
                .with_repetition(Repetition::REPEATED)
                .with_converted_type(ConvertedType::MAP_KEY_VALUE)
                .with_fields(vec![Arc::new(key), Arc::new(value)])
                .build()?;
            Ok(Type::group_type_builder(name)
                .with_repetition(repetition)
                .with_converted_type(ConvertedType::MAP)
                .with_fields(vec![Arc::new(entries)])
                .build()?)
        }
        RecordSchema::Union(branches) => convert_union(name, branches, repetition, depth),
    }
}

fn convert_union(
    name: &str,
    branches: &[RecordSchema],
    repetition: Repetition,
    depth: usize,
) -> Result<Type, ConversionError> {
    let mut repetition = repetition;
    let mut non_null = Vec::with_capacity(branches.len());
    for branch in branches {
        if branch.is_null() {
            repetition = Repetition::OPTIONAL;
        } else {
            non_null.push(branch);
        }
    }

    match non_null.as_slice() {
        [] => Err(ConversionError::EmptyUnion {
            field: name.to_string(),
        }),
        [single] => convert_field(name, single, repetition, depth + 1),
        members => {
            let children = members
                .iter()
                .enumerate()
                .map(|(i, member)| {
                    convert_field(&format!("member{i}"), member, Repetition::OPTIONAL, depth + 1)
                        .map(Arc::new)
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Type::group_type_builder(name)
                .with_repetition(repetition)
                .with_fields(children)
                .build()?)
        }
    }
}

fn primitive(
    name: &str,
    physical: PhysicalType,
    repetition: Repetition,
) -> Result<Type, ConversionError> {
    Ok(Type::primitive_type_builder(name, physical)
        .with_repetition(repetition)
        .build()?)
}

fn annotated(
    name: &str,
    converted: ConvertedType,
    repetition: Repetition,
) -> Result<Type, ConversionError> {
    Ok(Type::primitive_type_builder(name, PhysicalType::BYTE_ARRAY)
        .with_repetition(repetition)
        .with_converted_type(converted)
        .build()?)
}
