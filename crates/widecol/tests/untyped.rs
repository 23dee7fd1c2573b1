use indexmap::IndexMap;
use serde_json::json;
use widecol::{map_to_row, row_to_map, Column, MappingError, Value};

fn fields() -> IndexMap<String, Value> {
    let mut m = IndexMap::new();
    m.insert("name".to_string(), Value::from("Alice"));
    m.insert("age".to_string(), Value::Int(30));
    m.insert("admin".to_string(), Value::Bool(false));
    m
}

#[test]
fn map_to_row_uses_plain_names_and_default_types() {
    let row = map_to_row("u1", &fields()).unwrap();
    assert_eq!(row.key, b"u1");
    let names: Vec<&[u8]> = row.columns.iter().map(|c| c.name.as_slice()).collect();
    assert_eq!(names, vec![&b"name"[..], b"age", b"admin"]);
    assert_eq!(row.columns[1].value, 30i64.to_be_bytes());
    assert_eq!(row.columns[2].value, [0u8]);

    let stamp = row.columns[0].timestamp;
    assert!(stamp.is_some_and(|t| t > 0));
    assert!(row.columns.iter().all(|c| c.timestamp == stamp));
}

#[test]
fn row_to_map_recovers_scheme_fields() {
    let mut row = map_to_row("u1", &fields()).unwrap();
    row.columns.push(Column::new(b"extra".to_vec(), b"ignored".to_vec()));

    let scheme: IndexMap<String, Value> = json!({"name": "", "age": 0, "admin": true})
        .as_object()
        .unwrap()
        .iter()
        .map(|(k, v)| (k.clone(), Value::try_from(v.clone()).unwrap()))
        .collect();

    let out = row_to_map(&scheme, &row).unwrap();
    assert_eq!(out, fields());
}

#[test]
fn row_to_map_reports_bad_values() {
    let mut scheme = IndexMap::new();
    scheme.insert("age".to_string(), Value::Int(0));
    let mut row = map_to_row("u1", &fields()).unwrap();
    row.columns[1].value = vec![1, 2];
    let err = row_to_map(&scheme, &row).unwrap_err();
    assert!(matches!(err, MappingError::Unmarshal { field, .. } if field == "age"));
}
