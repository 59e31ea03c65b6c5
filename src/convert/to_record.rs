//! Reconstruction of record schemas from Parquet message types.
//!
//! The mapping inverts the record-to-Parquet lowering: `required`
//! fields convert directly, `optional` fields become `[null, T]` unions,
//! `LIST` and `MAP` groups unwrap to arrays and maps, and unannotated groups
//! of all-optional `member<i>` fields fold back into multi-branch unions.
//! Enum symbol lists are not stored in Parquet metadata, so enums come back
//! with an empty symbol list.

use parquet::basic::{ConvertedType, Repetition, Type as PhysicalType};
use parquet::schema::types::{BasicTypeInfo, Type, TypePtr};

use crate::model::{RecordField, RecordSchema};

use super::{ConversionError, MAX_NESTING_DEPTH};

/// Converts a Parquet message type back into a record schema.
///
/// The input must be a group; its name becomes the record name and its
/// fields become the record's fields in declared order. The result is exact
/// for message types produced by [`to_parquet_schema`](super::to_parquet_schema),
/// except that enum symbol lists come back empty and multi-branch union
/// members keep their positional `member<i>` encoding.
///
/// # Errors
///
/// Returns [`ConversionError::TopLevelNotGroup`] for a primitive input,
/// [`ConversionError::NonStringMapKey`] for a map whose key is not
/// `binary (UTF8)`, and the malformed-shape errors documented on
/// [`ConversionError`] for LIST or MAP groups without their single expected
/// child, stray `repeated` fields, and Parquet types with no record model
/// counterpart.
pub fn to_record_schema(message: &Type) -> Result<RecordSchema, ConversionError> {
    match message {
        Type::GroupType { basic_info, fields } => {
            convert_group_fields(basic_info.name(), fields, 0)
        }
        Type::PrimitiveType { basic_info, .. } => Err(ConversionError::TopLevelNotGroup {
            name: basic_info.name().to_string(),
        }),
    }
}

fn convert_group_fields(
    name: &str,
    fields: &[TypePtr],
    depth: usize,
) -> Result<RecordSchema, ConversionError> {
    let mut converted = Vec::with_capacity(fields.len());
    for child in fields {
        converted.push(RecordField::new(child.name(), convert_child(child, depth)?));
    }
    Ok(RecordSchema::Record {
        name: name.to_string(),
        fields: converted,
    })
}

/// Converts a group member, folding its repetition into the result type.
fn convert_child(child: &Type, depth: usize) -> Result<RecordSchema, ConversionError> {
    match repetition_of(child)? {
        Repetition::REQUIRED => convert_type(child, depth + 1),
        Repetition::OPTIONAL => Ok(as_optional(convert_type(child, depth + 1)?)),
        Repetition::REPEATED => Err(ConversionError::StrayRepeated {
            field: child.name().to_string(),
        }),
    }
}

/// Converts a type irrespective of its repetition marker.
fn convert_type(t: &Type, depth: usize) -> Result<RecordSchema, ConversionError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(ConversionError::NestingTooDeep {
            limit: MAX_NESTING_DEPTH,
        });
    }

    match t {
        Type::PrimitiveType {
            basic_info,
            physical_type,
            type_length,
            ..
        } => convert_primitive(basic_info, *physical_type, *type_length),
        Type::GroupType { basic_info, fields } => match annotation(basic_info) {
            ConvertedType::LIST => convert_list(basic_info.name(), fields, depth),
            ConvertedType::MAP => convert_map(basic_info.name(), fields, depth),
            ConvertedType::NONE => {
                if is_union_group(fields) {
                    let members = fields
                        .iter()
                        .map(|member| convert_type(member, depth + 1))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(RecordSchema::Union(members))
                } else {
                    convert_group_fields(basic_info.name(), fields, depth)
                }
            }
            other => Err(ConversionError::Unsupported {
                field: basic_info.name().to_string(),
                detail: format!("group annotation {other} is not mapped"),
            }),
        },
    }
}

fn convert_primitive(
    info: &BasicTypeInfo,
    physical: PhysicalType,
    type_length: i32,
) -> Result<RecordSchema, ConversionError> {
    match physical {
        PhysicalType::BOOLEAN => Ok(RecordSchema::Boolean),
        PhysicalType::INT32 => Ok(RecordSchema::Int),
        PhysicalType::INT64 => Ok(RecordSchema::Long),
        PhysicalType::FLOAT => Ok(RecordSchema::Float),
        PhysicalType::DOUBLE => Ok(RecordSchema::Double),
        PhysicalType::BYTE_ARRAY => match annotation(info) {
            ConvertedType::UTF8 => Ok(RecordSchema::String),
            // Symbols are not persisted; callers that need them must
            // recover the list from an external registry.
            ConvertedType::ENUM => Ok(RecordSchema::Enum {
                symbols: Vec::new(),
            }),
            ConvertedType::NONE => Ok(RecordSchema::Bytes),
            other => Err(ConversionError::Unsupported {
                field: info.name().to_string(),
                detail: format!("binary annotation {other} is not mapped"),
            }),
        },
        PhysicalType::FIXED_LEN_BYTE_ARRAY => Ok(RecordSchema::Fixed {
            size: type_length as usize,
        }),
        PhysicalType::INT96 => Err(ConversionError::Unsupported {
            field: info.name().to_string(),
            detail: "int96 has no record model counterpart".to_string(),
        }),
    }
}

fn convert_list(
    name: &str,
    fields: &[TypePtr],
    depth: usize,
) -> Result<RecordSchema, ConversionError> {
    let element = match fields {
        [element] => element,
        other => {
            return Err(ConversionError::MalformedList {
                group: name.to_string(),
                detail: format!("expected exactly one element field, found {}", other.len()),
            })
        }
    };

    let element_schema = match repetition_of(element)? {
        Repetition::REPEATED => convert_type(element, depth + 1)?,
        // A nullable element is stored as an optional field inside the list.
        Repetition::OPTIONAL => as_optional(convert_type(element, depth + 1)?),
        Repetition::REQUIRED => {
            return Err(ConversionError::MalformedList {
                group: name.to_string(),
                detail: format!("element field '{}' must be repeated", element.name()),
            })
        }
    };
    Ok(RecordSchema::array(element_schema))
}

fn convert_map(
    name: &str,
    fields: &[TypePtr],
    depth: usize,
) -> Result<RecordSchema, ConversionError> {
    let entries = match fields {
        [entries] => entries,
        other => {
            return Err(ConversionError::MalformedMap {
                group: name.to_string(),
                detail: format!("expected exactly one entry group, found {} fields", other.len()),
            })
        }
    };
    if !entries.is_group() {
        return Err(ConversionError::MalformedMap {
            group: name.to_string(),
            detail: format!("entry field '{}' must be a group", entries.name()),
        });
    }
    if repetition_of(entries)? != Repetition::REPEATED {
        return Err(ConversionError::MalformedMap {
            group: name.to_string(),
            detail: format!("entry group '{}' must be repeated", entries.name()),
        });
    }

    let (key, value) = match entries.get_fields() {
        [key, value] => (key, value),
        other => {
            return Err(ConversionError::MalformedMap {
                group: name.to_string(),
                detail: format!(
                    "entry group must hold a key and a value, found {} fields",
                    other.len()
                ),
            })
        }
    };

    let key_is_string = matches!(
        key.as_ref(),
        Type::PrimitiveType {
            physical_type: PhysicalType::BYTE_ARRAY,
            ..
        }
    ) && annotation(key.get_basic_info()) == ConvertedType::UTF8;
    if !key_is_string {
        return Err(ConversionError::NonStringMapKey {
            group: name.to_string(),
            found: describe(key),
        });
    }

    let value_schema = match repetition_of(value)? {
        Repetition::REQUIRED => convert_type(value, depth + 1)?,
        Repetition::OPTIONAL => as_optional(convert_type(value, depth + 1)?),
        Repetition::REPEATED => {
            return Err(ConversionError::StrayRepeated {
                field: value.name().to_string(),
            })
        }
    };
    Ok(RecordSchema::map(value_schema))
}

/// Recognizes the group shape written for multi-branch unions: two or more
/// children, all optional, positionally named `member0`, `member1`, and so
/// on. Arbitrary hand-written groups that happen to match this shape are
/// also folded back into unions.
fn is_union_group(fields: &[TypePtr]) -> bool {
    fields.len() >= 2
        && fields.iter().enumerate().all(|(i, member)| {
            let info = member.get_basic_info();
            info.has_repetition()
                && info.repetition() == Repetition::OPTIONAL
                && info.name() == format!("member{i}")
        })
}

/// Marks a reconstructed type as nullable, splicing reconstructed unions
/// instead of nesting them.
fn as_optional(inner: RecordSchema) -> RecordSchema {
    match inner {
        RecordSchema::Union(members) => {
            let mut branches = Vec::with_capacity(members.len() + 1);
            branches.push(RecordSchema::Null);
            branches.extend(members);
            RecordSchema::Union(branches)
        }
        other => RecordSchema::nullable(other),
    }
}

/// The effective annotation of a field, reading the converted type with the
/// logical type as a fallback for schemas written in the newer style.
fn annotation(info: &BasicTypeInfo) -> ConvertedType {
    match info.converted_type() {
        ConvertedType::NONE => ConvertedType::from(info.logical_type()),
        converted => converted,
    }
}

fn repetition_of(t: &Type) -> Result<Repetition, ConversionError> {
    let info = t.get_basic_info();
    if info.has_repetition() {
        Ok(info.repetition())
    } else {
        Err(ConversionError::MissingRepetition {
            field: info.name().to_string(),
        })
    }
}

fn describe(t: &Type) -> String {
    match t {
        Type::PrimitiveType {
            basic_info,
            physical_type,
            ..
        } => match annotation(basic_info) {
            ConvertedType::NONE => physical_type.to_string(),
            converted => format!("{physical_type} ({converted})"),
        },
        Type::GroupType { .. } => "group".to_string(),
    }
}
