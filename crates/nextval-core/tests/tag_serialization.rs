use nextval_core::{TagSettings, Value};

#[test]
fn serializes_tag_settings_deterministically() {
    let tags = TagSettings::parse("primaryKey;next:snowflake;column:id");

    let json = serde_json::to_string_pretty(&tags).expect("serialize tags");
    let expected = r#"{
  "COLUMN": "id",
  "NEXT": "snowflake",
  "PRIMARYKEY": "PRIMARYKEY"
}"#;
    assert_eq!(json, expected);
}

#[test]
fn value_variants_tag_by_type() {
    let json = serde_json::to_string(&Value::Uint(750_350_266_425)).expect("serialize value");
    assert_eq!(json, r#"{"uint":750350266425}"#);

    let parsed: Value = serde_json::from_str(r#"{"text":"20220101A01"}"#).expect("parse value");
    assert_eq!(parsed, Value::Text("20220101A01".to_string()));
}
