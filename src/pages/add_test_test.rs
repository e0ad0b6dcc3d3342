use super::*;

// =============================================================
// descriptor_field_names
// =============================================================

#[test]
fn names_come_from_the_properties_object() {
    let fields = serde_json::json!({
        "properties": {
            "result": {"type": "string"},
            "ct": {"type": "number"}
        }
    });
    let mut names = descriptor_field_names(&fields);
    names.sort();
    assert_eq!(names, vec!["ct".to_owned(), "result".to_owned()]);
}

#[test]
fn descriptor_without_properties_yields_no_fields() {
    assert!(descriptor_field_names(&serde_json::json!({})).is_empty());
    assert!(descriptor_field_names(&serde_json::json!({"properties": 3})).is_empty());
    assert!(descriptor_field_names(&serde_json::Value::Null).is_empty());
}

// =============================================================
// collect_results
// =============================================================

#[test]
fn collect_keeps_only_descriptor_fields() {
    let names = vec!["result".to_owned()];
    let mut values = HashMap::new();
    values.insert("result".to_owned(), "negative".to_owned());
    values.insert("stray".to_owned(), "ignored".to_owned());

    let results = collect_results(&names, &values);
    assert_eq!(results, serde_json::json!({"result": "negative"}));
}

#[test]
fn collect_drops_blank_values_and_trims() {
    let names = vec!["result".to_owned(), "ct".to_owned()];
    let mut values = HashMap::new();
    values.insert("result".to_owned(), "  positive  ".to_owned());
    values.insert("ct".to_owned(), "   ".to_owned());

    let results = collect_results(&names, &values);
    assert_eq!(results, serde_json::json!({"result": "positive"}));
}

#[test]
fn collect_with_no_values_yields_empty_object() {
    let results = collect_results(&["result".to_owned()], &HashMap::new());
    assert_eq!(results, serde_json::json!({}));
}
