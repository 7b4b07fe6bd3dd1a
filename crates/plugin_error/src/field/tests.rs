use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_insert_preserves_order() {
    let mut map = FieldMap::new();
    map.insert("first", 1);
    map.insert("second", 2);
    map.insert("third", 3);

    let keys: Vec<_> = map.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["first", "second", "third"]);
}

#[test]
fn test_insert_existing_key_updates_in_place() {
    let mut map = FieldMap::new();
    map.insert("first", 1);
    map.insert("second", 2);
    map.insert("first", 10);

    let keys: Vec<_> = map.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["first", "second"]);
    assert_eq!(map.get("first"), Some(&FieldValue::Int(10)));
    assert_eq!(map.len(), 2);
}

#[test]
fn test_remove() {
    let mut map = FieldMap::new();
    map.insert("key", "value");

    assert_eq!(map.remove("key"), Some(FieldValue::Str("value".to_string())));
    assert_eq!(map.remove("key"), None);
    assert!(map.is_empty());
}

#[test]
fn test_get_missing_key() {
    let map = FieldMap::new();
    assert_eq!(map.get("absent"), None);
}

#[test]
fn test_from_iterator() {
    let map: FieldMap = [("a", 1), ("b", 2)].into_iter().collect();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("b"), Some(&FieldValue::Int(2)));
}

#[test]
fn test_value_display() {
    assert_eq!(FieldValue::Str("text".to_string()).to_string(), "text");
    assert_eq!(FieldValue::Int(35).to_string(), "35");
    assert_eq!(FieldValue::Bool(true).to_string(), "true");
    assert_eq!(FieldValue::Float(1.5).to_string(), "1.5");
    assert_eq!(FieldValue::Null.to_string(), "null");
}

#[test]
fn test_value_accessors() {
    assert!(FieldValue::Null.is_null());
    assert!(!FieldValue::Int(0).is_null());
    assert_eq!(FieldValue::Bool(false).as_bool(), Some(false));
    assert_eq!(FieldValue::Str("x".to_string()).as_bool(), None);
    assert_eq!(FieldValue::Int(7).as_int(), Some(7));
    assert_eq!(FieldValue::Str("x".to_string()).as_str(), Some("x"));
}

#[test]
fn test_value_conversions() {
    assert_eq!(FieldValue::from("s"), FieldValue::Str("s".to_string()));
    assert_eq!(FieldValue::from(35_i32), FieldValue::Int(35));
    assert_eq!(FieldValue::from(35_u32), FieldValue::Int(35));
    assert_eq!(FieldValue::from(true), FieldValue::Bool(true));
}

#[test]
fn test_constant_sets_are_disjoint_where_expected() {
    // Every flag/core key that the merger accepts is also hidden from the
    // detail output; the five diagnostic slots are accepted and rendered.
    for key in ["plugin", "name", "message", "stack", "show_stack", "show_properties"] {
        assert!(ALLOWED_FIELDS.contains(&key));
        assert!(IGNORED_FIELDS.contains(&key));
    }
    for key in ["file_name", "line_number", "column_number", "cause", "code"] {
        assert!(ALLOWED_FIELDS.contains(&key));
        assert!(!IGNORED_FIELDS.contains(&key));
    }
}
