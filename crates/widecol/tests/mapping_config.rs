mod common;

use std::sync::OnceLock;

use common::records::{Event, User};
use serde::Deserialize;
use widecol::{
    FieldRole, Mapping, MappingError, MappingKind, MappingSpec, Record, RecordDescriptor,
    TypeClass,
};

#[derive(Debug, Deserialize)]
struct Config {
    users: MappingSpec,
    events: MappingSpec,
}

const CONFIG: &str = r#"
[users]
cf = "users"
key = "Id"
cols = ["Kind"]

[events]
cf = "events"
key = "Stream"
cols = ["At", "Seq"]
value = "Payload"
mapping = "compact"
"#;

#[test]
fn specs_load_from_toml() {
    let config: Config = toml::from_str(CONFIG).unwrap();
    assert_eq!(
        config.users,
        MappingSpec::sparse("users", "Id").with_cols(["Kind"])
    );
    assert_eq!(config.events.mapping, MappingKind::Compact);

    let users = Mapping::<User>::new(&config.users).unwrap();
    assert_eq!(users.kind(), MappingKind::Sparse);
    let events = Mapping::<Event>::new(&config.events).unwrap();
    assert_eq!(events.cf(), "events");
}

#[test]
fn specs_load_from_json() {
    let spec: MappingSpec =
        serde_json::from_str(r#"{"cf": "users", "key": "Id", "cols": ["Kind"]}"#).unwrap();
    assert_eq!(spec.mapping, MappingKind::Sparse);
    assert!(Mapping::<User>::new(&spec).is_ok());
}

#[test]
fn unknown_mapping_kind_fails_deserialization() {
    let err = toml::from_str::<MappingSpec>("cf = \"u\"\nkey = \"Id\"\nmapping = \"wide\"\n")
        .unwrap_err();
    assert!(err.to_string().contains("unrecognized mapping type wide"));
}

#[test]
fn unknown_fields_are_rejected_by_role() {
    let cases = [
        (MappingSpec::sparse("users", "Uid"), FieldRole::Key, "Uid"),
        (
            MappingSpec::sparse("users", "Id").with_cols(["Kind", "Region"]),
            FieldRole::Component,
            "Region",
        ),
    ];
    for (spec, role, missing) in cases {
        match Mapping::<User>::new(&spec).unwrap_err() {
            MappingError::UnknownField {
                role: r,
                field,
                record,
            } => {
                assert_eq!(r, role);
                assert_eq!(field, missing);
                assert_eq!(record, "User");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    let spec = MappingSpec::compact("events", "Stream").with_value("Body");
    let err = Mapping::<Event>::new(&spec).unwrap_err();
    assert_eq!(err.to_string(), "value field Body not found in record type Event");
}

#[test]
fn sparse_mappings_check_the_value_field_too() {
    let spec = MappingSpec::sparse("users", "Id")
        .with_cols(["Kind"])
        .with_value("Nope");
    assert!(matches!(
        Mapping::<User>::new(&spec),
        Err(MappingError::UnknownField { role: FieldRole::Value, ref field, .. }) if field == "Nope"
    ));

    let spec = MappingSpec::sparse("users", "Id")
        .with_cols(["Kind"])
        .with_value("Name");
    assert!(Mapping::<User>::new(&spec).is_ok());
}

#[derive(Debug, Default)]
struct Untagged {
    id: String,
}

impl Record for Untagged {
    fn descriptor() -> &'static RecordDescriptor<Self> {
        static DESCRIPTOR: OnceLock<RecordDescriptor<Untagged>> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            RecordDescriptor::<Untagged>::builder("Untagged")
                .tag("key", "Id")
                .field("Id", TypeClass::Utf8, |r| r.id.clone().into(), |r, v| {
                    r.id = v.try_into()?;
                    Ok(())
                })
                .build()
                .expect("Untagged descriptor")
        })
    }
}

#[test]
fn record_tags_need_column_family() {
    let err = Mapping::<Untagged>::from_record().unwrap_err();
    assert_eq!(
        err.to_string(),
        "mandatory setting 'cf' not found for record type Untagged"
    );
}

#[test]
fn duplicate_fields_are_rejected() {
    struct Dup {
        a: i64,
    }
    let err = RecordDescriptor::<Dup>::builder("Dup")
        .field("A", TypeClass::Long, |d| d.a.into(), |d, v| {
            d.a = v.try_into()?;
            Ok(())
        })
        .field_as("B", "A", TypeClass::Long, |d| d.a.into(), |d, v| {
            d.a = v.try_into()?;
            Ok(())
        })
        .build()
        .unwrap_err();
    assert!(matches!(err, MappingError::DuplicateField { field, .. } if field == "B"));
}

#[test]
fn mappings_are_shareable_across_threads() {
    let mapping = std::sync::Arc::new(Mapping::<User>::from_record().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let mapping = mapping.clone();
            std::thread::spawn(move || {
                let u = common::records::user(&format!("u{i}"), "profile", "N", i);
                mapping.map(&u).unwrap().key
            })
        })
        .collect();
    let keys: Vec<Vec<u8>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(keys[3], b"u3");
}
