use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_new_sets_plugin_and_message() {
    let err = PluginError::new("test", "something broke").unwrap();
    assert_eq!(err.plugin, "test");
    assert_eq!(err.message, "something broke");
}

#[test]
fn test_name_defaults_to_error() {
    let err = PluginError::new("test", "something broke").unwrap();
    assert_eq!(err.name, "Error");
}

#[test]
fn test_name_defaults_to_error_when_cause_has_no_name() {
    let err = PluginError::wrap("test", Cause::new("something broke")).unwrap();
    assert_eq!(err.name, "Error");
}

#[test]
fn test_missing_plugin_name_fails() {
    let result = PluginError::from_options(ErrorOptions::new().with_message("something broke"));
    assert_eq!(result.unwrap_err(), ConstructionError::MissingPluginName);

    let result = PluginError::new("", "something broke");
    assert_eq!(result.unwrap_err(), ConstructionError::MissingPluginName);
}

#[test]
fn test_missing_message_fails() {
    let result = PluginError::from_options(ErrorOptions::new().with_plugin("test"));
    assert_eq!(result.unwrap_err(), ConstructionError::MissingMessage);

    let result = PluginError::new("test", "");
    assert_eq!(result.unwrap_err(), ConstructionError::MissingMessage);
}

#[test]
fn test_construction_error_messages() {
    assert_eq!(
        ConstructionError::MissingPluginName.to_string(),
        "Missing plugin name"
    );
    assert_eq!(
        ConstructionError::MissingMessage.to_string(),
        "Missing error message"
    );
}

#[test]
fn test_flag_defaults() {
    let err = PluginError::new("test", "something broke").unwrap();
    assert!(!err.show_stack);
    assert!(err.show_properties);
}

#[test]
fn test_flags_independently_overridable() {
    for (show_stack, show_properties) in
        [(false, false), (false, true), (true, false), (true, true)]
    {
        let options = ErrorOptions::new()
            .with_show_stack(show_stack)
            .with_show_properties(show_properties);
        let err = PluginError::with_options("test", "something broke", options).unwrap();
        assert_eq!(err.show_stack, show_stack);
        assert_eq!(err.show_properties, show_properties);
    }
}

#[test]
fn test_descriptor_shape() {
    let err = PluginError::from_options(
        ErrorOptions::new()
            .with_plugin("test")
            .with_message("something broke")
            .with_show_stack(true),
    )
    .unwrap();

    assert_eq!(err.plugin, "test");
    assert_eq!(err.message, "something broke");
    assert!(err.show_stack);
}

#[test]
fn test_positional_arguments_override_bag() {
    let options = ErrorOptions::new()
        .with_plugin("stale")
        .with_message("stale message");
    let err = PluginError::with_options("test", "something broke", options).unwrap();

    assert_eq!(err.plugin, "test");
    assert_eq!(err.message, "something broke");
}

#[test]
fn test_cause_import_takes_diagnostic_fields() {
    let cause = Cause::new("something broke")
        .with_file_name("original.rs")
        .with_line_number(35)
        .with_column_number(12);
    let err = PluginError::wrap("test", cause).unwrap();

    assert_eq!(err.message, "something broke");
    assert_eq!(err.file_name.as_deref(), Some("original.rs"));
    assert_eq!(err.line_number, Some(35));
    assert_eq!(err.column_number, Some(12));
}

#[test]
fn test_cause_import_takes_name_and_stack() {
    let cause = Cause::new("something broke")
        .with_name("TypeError")
        .with_stack("at demo (src/demo.rs:1)");
    let err = PluginError::wrap("test", cause).unwrap();

    assert_eq!(err.name, "TypeError");
    assert_eq!(err.stack.as_deref(), Some("at demo (src/demo.rs:1)"));
}

#[test]
fn test_cause_extra_fields_land_on_record() {
    let cause = Cause::new("something broke").with_field("hint", "check the config");
    let err = PluginError::wrap("test", cause).unwrap();

    assert_eq!(err.field("hint").unwrap().as_str(), Some("check the config"));
}

#[test]
fn test_cause_extra_field_routed_into_typed_slot() {
    // A cause carrying an allow-listed key in its loose field bag still
    // lands on the typed slot, not in the extras map.
    let cause = Cause::new("something broke").with_field("file_name", "original.rs");
    let err = PluginError::wrap("test", cause).unwrap();

    assert_eq!(err.file_name.as_deref(), Some("original.rs"));
    assert_eq!(err.field("file_name"), None);
}

#[test]
fn test_options_win_over_cause() {
    let cause = Cause::new("something broke").with_file_name("original.rs");
    let options = ErrorOptions::new()
        .with_show_stack(true)
        .with_file_name("override.rs");
    let err = PluginError::wrap_with_options("test", cause, options).unwrap();

    assert_eq!(err.plugin, "test");
    assert_eq!(err.message, "something broke");
    assert!(err.show_stack);
    assert_eq!(err.file_name.as_deref(), Some("override.rs"));
}

#[test]
fn test_unknown_option_fields_dropped() {
    let options = ErrorOptions::new()
        .with_field("file_name", "original.rs")
        .with_field("additional_property", "additional");
    let err = PluginError::with_options("test", "something broke", options).unwrap();

    assert_eq!(err.file_name.as_deref(), Some("original.rs"));
    assert_eq!(err.field("additional_property"), None);
    assert!(err.fields.is_empty());
}

#[test]
fn test_dynamic_flag_and_number_coercion() {
    let options = ErrorOptions::new()
        .with_field("show_stack", true)
        .with_field("line_number", 35);
    let err = PluginError::with_options("test", "something broke", options).unwrap();

    assert!(err.show_stack);
    assert_eq!(err.line_number, Some(35));
}

#[test]
fn test_uncoercible_dynamic_value_is_dropped_without_error() {
    let options = ErrorOptions::new()
        .with_field("show_stack", "not a flag")
        .with_field("line_number", -1);
    let err = PluginError::with_options("test", "something broke", options).unwrap();

    assert!(!err.show_stack);
    assert_eq!(err.line_number, None);
}

#[test]
fn test_stack_captured_when_none_supplied() {
    let err = PluginError::new("test", "something broke").unwrap();
    assert!(err.stack.is_none());
    assert!(err.captured_stack.is_some());
}

#[test]
fn test_no_capture_when_stack_supplied() {
    let options = ErrorOptions::new().with_stack("at huh");
    let err = PluginError::with_options("test", "something broke", options).unwrap();

    assert_eq!(err.stack.as_deref(), Some("at huh"));
    assert!(err.captured_stack.is_none());
}

#[test]
fn test_construction_does_not_mutate_inputs() {
    let cause = Cause::new("something broke").with_field("hint", "check the config");
    let options = ErrorOptions::new()
        .with_show_properties(true)
        .with_stack("test stack")
        .with_error(cause);

    let before = options.clone();
    let _ = PluginError::from_options(options.clone()).unwrap();
    assert_eq!(options, before);
}

#[test]
fn test_record_mutable_after_construction() {
    let mut err = PluginError::new("test", "something broke").unwrap();
    err.set_field("extra_field", "x");
    err.set_field("extra_field", "y");
    err.file_name = Some("original.rs".to_string());

    assert_eq!(err.field("extra_field").unwrap().as_str(), Some("y"));
    assert_eq!(err.fields.len(), 1);
}

#[test]
fn test_error_trait_object() {
    let err = PluginError::new("test", "something broke").unwrap();
    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert!(boxed.to_string().contains("something broke"));
}

proptest! {
    #[test]
    fn any_nonempty_pair_round_trips(
        plugin in "[a-zA-Z][a-zA-Z0-9_-]{0,15}",
        message in "[ -~]{1,60}",
    ) {
        let err = PluginError::new(plugin.clone(), message.clone()).unwrap();
        prop_assert_eq!(err.plugin, plugin);
        prop_assert_eq!(err.message, message);
        prop_assert!(!err.show_stack);
        prop_assert!(err.show_properties);
    }
}
