use widecol::schema::KeyspaceDef;
use widecol::{Schema, TypeClass};

const KEYSPACE: &str = r#"{
  "name": "app",
  "cf_defs": [
    null,
    {
      "name": "users",
      "column_type": "Standard",
      "comparator_type": "org.apache.cassandra.db.marshal.CompositeType(org.apache.cassandra.db.marshal.UTF8Type,org.apache.cassandra.db.marshal.UTF8Type)",
      "default_validation_class": "org.apache.cassandra.db.marshal.BytesType",
      "key_validation_class": "org.apache.cassandra.db.marshal.UTF8Type",
      "column_metadata": [
        null,
        {"name": [65, 103, 101], "validation_class": "org.apache.cassandra.db.marshal.LongType"}
      ]
    },
    {
      "name": "hits",
      "column_type": "Standard",
      "comparator_type": "UTF8Type",
      "default_validation_class": "CounterColumnType",
      "key_validation_class": "UTF8Type"
    },
    {
      "name": "legacy",
      "column_type": "Super",
      "comparator_type": "UTF8Type"
    }
  ]
}"#;

#[test]
fn translates_standard_column_families() {
    let ks: KeyspaceDef = serde_json::from_str(KEYSPACE).unwrap();
    let schema = Schema::from_keyspace(&ks);

    assert_eq!(schema.column_families.len(), 2);
    assert!(schema.column_family("legacy").is_none());

    let users = schema.column_family("users").unwrap();
    assert_eq!(
        users.default_comparator,
        TypeClass::Composite(vec![TypeClass::Utf8, TypeClass::Utf8])
    );
    assert_eq!(users.key_validator, TypeClass::Utf8);
    assert_eq!(users.validator("Age"), &TypeClass::Long);
    assert_eq!(users.validator("Name"), &TypeClass::Bytes);

    let hits = schema.column_family("hits").unwrap();
    assert_eq!(hits.default_validator, TypeClass::Counter);
    assert!(hits.named_columns.is_empty());
}

#[test]
fn absent_settings_default_to_bytes() {
    let ks: KeyspaceDef =
        serde_json::from_str(r#"{"name": "app", "cf_defs": [{"name": "raw"}]}"#).unwrap();
    let schema = Schema::from_keyspace(&ks);
    let raw = schema.column_family("raw").unwrap();
    assert_eq!(raw.default_comparator, TypeClass::Bytes);
    assert_eq!(raw.key_validator, TypeClass::Bytes);
}
