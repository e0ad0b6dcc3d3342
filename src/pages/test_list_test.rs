use super::*;

// =============================================================
// Helpers
// =============================================================

fn test_at(id: &str, creation_time: &str) -> Test {
    Test {
        id: id.to_owned(),
        user_id: "u-1".to_owned(),
        test_type_id: "tt-1".to_owned(),
        creation_time: creation_time.to_owned(),
        results: serde_json::json!({}),
    }
}

fn catalog() -> Vec<TestType> {
    vec![TestType {
        id: "tt-1".to_owned(),
        name: "PCR".to_owned(),
        fields: serde_json::json!({}),
        needed_permission_to_add_results: String::new(),
    }]
}

// =============================================================
// test_type_name
// =============================================================

#[test]
fn known_type_resolves_to_display_name() {
    assert_eq!(test_type_name(&catalog(), "tt-1"), "PCR");
}

#[test]
fn unknown_type_falls_back_to_its_id() {
    assert_eq!(test_type_name(&catalog(), "tt-gone"), "tt-gone");
}

// =============================================================
// sort_tests_newest_first
// =============================================================

#[test]
fn sorting_puts_newest_first() {
    let sorted = sort_tests_newest_first(vec![
        test_at("old", "2026-01-01T08:00:00Z"),
        test_at("new", "2026-08-07T08:00:00Z"),
        test_at("mid", "2026-05-01T08:00:00Z"),
    ]);
    let ids: Vec<&str> = sorted.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["new", "mid", "old"]);
}

#[test]
fn sorting_an_empty_list_is_fine() {
    assert!(sort_tests_newest_first(Vec::new()).is_empty());
}
