use super::*;
use serde_json::json;

#[test]
fn test_builder_helpers() {
    let schema = RecordSchema::record(
        "point",
        vec![
            RecordField::new("x", RecordSchema::Double),
            RecordField::new("y", RecordSchema::Double),
            RecordField::new("label", RecordSchema::nullable(RecordSchema::String)),
        ],
    );

    match &schema {
        RecordSchema::Record { name, fields } => {
            assert_eq!(name, "point");
            assert_eq!(fields.len(), 3);
            assert_eq!(fields[0].name, "x");
            assert_eq!(
                fields[2].schema,
                RecordSchema::Union(vec![RecordSchema::Null, RecordSchema::String])
            );
        }
        other => panic!("expected record, got {}", other.kind_name()),
    }
}

#[test]
fn test_kind_names() {
    assert_eq!(RecordSchema::Null.kind_name(), "null");
    assert_eq!(RecordSchema::Fixed { size: 16 }.kind_name(), "fixed");
    assert_eq!(
        RecordSchema::array(RecordSchema::Int).kind_name(),
        "array"
    );
    assert_eq!(RecordSchema::Union(vec![]).kind_name(), "union");
}

#[test]
fn test_is_null() {
    assert!(RecordSchema::Null.is_null());
    assert!(!RecordSchema::Boolean.is_null());
    assert!(!RecordSchema::nullable(RecordSchema::Int).is_null());
}

#[test]
fn test_json_layout() {
    let schema = RecordSchema::record(
        "user",
        vec![
            RecordField::new("id", RecordSchema::Long),
            RecordField::new("email", RecordSchema::nullable(RecordSchema::String)),
            RecordField::new("tags", RecordSchema::array(RecordSchema::String)),
        ],
    );

    let value = serde_json::to_value(&schema).unwrap();
    assert_eq!(
        value,
        json!({
            "record": {
                "name": "user",
                "fields": [
                    { "name": "id", "schema": "long" },
                    { "name": "email", "schema": { "union": ["null", "string"] } },
                    { "name": "tags", "schema": { "array": { "items": "string" } } },
                ]
            }
        })
    );
}

#[test]
fn test_json_round_trip() {
    let schema = RecordSchema::record(
        "event",
        vec![
            RecordField::new("kind", RecordSchema::Enum {
                symbols: vec!["created".to_string(), "deleted".to_string()],
            }),
            RecordField::new("checksum", RecordSchema::Fixed { size: 32 }),
            RecordField::new(
                "attributes",
                RecordSchema::map(RecordSchema::nullable(RecordSchema::Long)),
            ),
        ],
    );

    let text = serde_json::to_string(&schema).unwrap();
    let back: RecordSchema = serde_json::from_str(&text).unwrap();
    assert_eq!(back, schema);
}
