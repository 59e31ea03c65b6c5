//! Integration tests for schema translation
//!
//! These tests exercise the full conversion surface: every record type is
//! lowered to a Parquet message type, compared against an expected message
//! text, and reconstructed back into the record model.

use parquet::schema::parser::parse_message_type;
use parquet::schema::printer::print_schema;
use parquet::schema::types::Type;

use recolumn::convert::{to_parquet_schema, to_record_schema, ConversionError};
use recolumn::model::{RecordField, RecordSchema};

fn parquet_text(message: &Type) -> String {
    let mut rendered = Vec::new();
    print_schema(&mut rendered, message);
    String::from_utf8(rendered).expect("printed schema is valid UTF-8")
}

/// Compares a converted message against an expected message text, routing
/// both through the same printer so formatting differences cancel out.
fn assert_message_eq(actual: &Type, expected_text: &str) {
    let expected = parse_message_type(expected_text).expect("expected text parses");
    assert_eq!(parquet_text(actual), parquet_text(&expected));
}

/// A record exercising every type kind at once.
fn all_types_schema() -> RecordSchema {
    RecordSchema::record(
        "myrecord",
        vec![
            RecordField::new("myboolean", RecordSchema::Boolean),
            RecordField::new("myint", RecordSchema::Int),
            RecordField::new("mylong", RecordSchema::Long),
            RecordField::new("myfloat", RecordSchema::Float),
            RecordField::new("mydouble", RecordSchema::Double),
            RecordField::new("mybytes", RecordSchema::Bytes),
            RecordField::new("mystring", RecordSchema::String),
            RecordField::new(
                "mynestedrecord",
                RecordSchema::record(
                    "mynestedrecord",
                    vec![RecordField::new("mynestedint", RecordSchema::Int)],
                ),
            ),
            RecordField::new("myenum", RecordSchema::Enum { symbols: Vec::new() }),
            RecordField::new("myarray", RecordSchema::array(RecordSchema::Int)),
            RecordField::new(
                "myoptionalarray",
                RecordSchema::nullable(RecordSchema::array(RecordSchema::Int)),
            ),
            RecordField::new(
                "myrecordarray",
                RecordSchema::array(RecordSchema::record(
                    "array",
                    vec![
                        RecordField::new("a", RecordSchema::Int),
                        RecordField::new("b", RecordSchema::Int),
                    ],
                )),
            ),
            RecordField::new("mymap", RecordSchema::map(RecordSchema::Int)),
            RecordField::new("myfixed", RecordSchema::Fixed { size: 1 }),
        ],
    )
}

const ALL_TYPES_MESSAGE: &str = "message myrecord {
    required boolean myboolean;
    required int32 myint;
    required int64 mylong;
    required float myfloat;
    required double mydouble;
    required binary mybytes;
    required binary mystring (UTF8);
    required group mynestedrecord {
        required int32 mynestedint;
    }
    required binary myenum (ENUM);
    required group myarray (LIST) {
        repeated int32 array;
    }
    optional group myoptionalarray (LIST) {
        repeated int32 array;
    }
    required group myrecordarray (LIST) {
        repeated group array {
            required int32 a;
            required int32 b;
        }
    }
    required group mymap (MAP) {
        repeated group map (MAP_KEY_VALUE) {
            required binary key (UTF8);
            required int32 value;
        }
    }
    required fixed_len_byte_array(1) myfixed;
}";

#[test]
fn test_all_types_to_parquet() {
    let message = to_parquet_schema(&all_types_schema()).unwrap();
    assert_message_eq(&message, ALL_TYPES_MESSAGE);
}

#[test]
fn test_all_types_from_parquet() {
    let message = parse_message_type(ALL_TYPES_MESSAGE).unwrap();
    let schema = to_record_schema(&message).unwrap();
    assert_eq!(schema, all_types_schema());
}

#[test]
fn test_all_types_round_trip() {
    let message = to_parquet_schema(&all_types_schema()).unwrap();
    let restored = to_record_schema(&message).unwrap();
    assert_eq!(restored, all_types_schema());

    // The second lowering reproduces the same message text.
    let message_again = to_parquet_schema(&restored).unwrap();
    assert_eq!(parquet_text(&message_again), parquet_text(&message));
}

#[test]
fn test_optional_field() {
    let schema = RecordSchema::record(
        "record1",
        vec![RecordField::new(
            "myint",
            RecordSchema::nullable(RecordSchema::Int),
        )],
    );
    let message = to_parquet_schema(&schema).unwrap();
    assert_message_eq(
        &message,
        "message record1 {
            optional int32 myint;
        }",
    );
    assert_eq!(to_record_schema(&message).unwrap(), schema);
}

#[test]
fn test_union_of_two_types() {
    // A union beyond the nullable pair is modelled as optional members of
    // the different types.
    let schema = RecordSchema::record(
        "record2",
        vec![RecordField::new(
            "myunion",
            RecordSchema::Union(vec![
                RecordSchema::Null,
                RecordSchema::Int,
                RecordSchema::Float,
            ]),
        )],
    );
    let message = to_parquet_schema(&schema).unwrap();
    assert_message_eq(
        &message,
        "message record2 {
            optional group myunion {
                optional int32 member0;
                optional float member1;
            }
        }",
    );
    assert_eq!(to_record_schema(&message).unwrap(), schema);
}

#[test]
fn test_map_with_non_string_key_fails() {
    let message = parse_message_type(
        "message myrecord {
            required group mymap (MAP) {
                repeated group map (MAP_KEY_VALUE) {
                    required int32 key;
                    required int32 value;
                }
            }
        }",
    )
    .unwrap();
    assert!(matches!(
        to_record_schema(&message).unwrap_err(),
        ConversionError::NonStringMapKey { .. }
    ));
}

#[test]
fn test_top_level_guards() {
    assert!(matches!(
        to_parquet_schema(&RecordSchema::Int).unwrap_err(),
        ConversionError::TopLevelNotRecord { .. }
    ));
    assert!(matches!(
        to_parquet_schema(&RecordSchema::array(RecordSchema::Int)).unwrap_err(),
        ConversionError::TopLevelNotRecord { .. }
    ));
}

#[test]
fn test_field_order_is_preserved() {
    let schema = RecordSchema::record(
        "ordered",
        vec![
            RecordField::new("a", RecordSchema::Int),
            RecordField::new("b", RecordSchema::String),
            RecordField::new("c", RecordSchema::Double),
        ],
    );
    let message = to_parquet_schema(&schema).unwrap();
    let names: Vec<_> = message
        .get_fields()
        .iter()
        .map(|field| field.name().to_string())
        .collect();
    assert_eq!(names, ["a", "b", "c"]);

    match to_record_schema(&message).unwrap() {
        RecordSchema::Record { fields, .. } => {
            let restored: Vec<_> = fields.into_iter().map(|field| field.name).collect();
            assert_eq!(restored, ["a", "b", "c"]);
        }
        other => panic!("expected record, got {}", other.kind_name()),
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn primitive_kind() -> impl Strategy<Value = RecordSchema> {
        prop_oneof![
            Just(RecordSchema::Boolean),
            Just(RecordSchema::Int),
            Just(RecordSchema::Long),
            Just(RecordSchema::Float),
            Just(RecordSchema::Double),
            Just(RecordSchema::Bytes),
            Just(RecordSchema::String),
            (1usize..64).prop_map(|size| RecordSchema::Fixed { size }),
        ]
    }

    /// Value schemas whose shape survives both directions exactly: records
    /// rename on the way back and enums drop their symbols, so neither
    /// appears here.
    fn round_trippable_schema() -> impl Strategy<Value = RecordSchema> {
        primitive_kind().prop_recursive(3, 16, 4, |inner| {
            prop_oneof![
                inner.clone().prop_map(RecordSchema::array),
                inner.clone().prop_map(RecordSchema::map),
                inner
                    .prop_filter("nullable wraps a non-union type", |schema| {
                        !matches!(schema, RecordSchema::Union(_))
                    })
                    .prop_map(RecordSchema::nullable),
            ]
        })
    }

    proptest! {
        /// Any primitive field, nullable or not, survives a full round trip.
        #[test]
        fn test_primitive_round_trip(
            name in "[a-z][a-z0-9_]{0,12}",
            kind in primitive_kind(),
            nullable in any::<bool>(),
        ) {
            let field_schema = if nullable {
                RecordSchema::nullable(kind)
            } else {
                kind
            };
            let schema = RecordSchema::record(
                "row",
                vec![RecordField::new(name, field_schema)],
            );
            let message = to_parquet_schema(&schema).unwrap();
            prop_assert_eq!(to_record_schema(&message).unwrap(), schema);
        }

        /// Nested arrays, maps, and nullable wrappers survive a round trip.
        #[test]
        fn test_nested_value_round_trip(value_schema in round_trippable_schema()) {
            let schema = RecordSchema::record(
                "row",
                vec![RecordField::new("value", value_schema)],
            );
            let message = to_parquet_schema(&schema).unwrap();
            prop_assert_eq!(to_record_schema(&message).unwrap(), schema);
        }

        /// Field order survives a round trip under arbitrary field counts.
        #[test]
        fn test_order_round_trip(names in prop::collection::vec("[a-z][a-z0-9_]{0,8}", 1..8)) {
            // Suffix with the position to keep names unique.
            let fields: Vec<_> = names
                .iter()
                .enumerate()
                .map(|(i, name)| RecordField::new(format!("{name}_{i}"), RecordSchema::Int))
                .collect();
            let schema = RecordSchema::record("row", fields);

            let message = to_parquet_schema(&schema).unwrap();
            let lowered: Vec<_> = message
                .get_fields()
                .iter()
                .map(|field| field.name().to_string())
                .collect();
            let declared: Vec<_> = names
                .iter()
                .enumerate()
                .map(|(i, name)| format!("{name}_{i}"))
                .collect();
            prop_assert_eq!(lowered, declared);
            prop_assert_eq!(to_record_schema(&message).unwrap(), schema);
        }
    }
}
