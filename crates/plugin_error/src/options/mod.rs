//! Construction inputs: the wrapped cause and the canonical options bag.
//!
//! Every constructor shape funnels into one [`ErrorOptions`] value before the
//! record pipeline runs, so import, merge, and validation always see the same
//! canonical form.

use crate::field::{FieldMap, FieldValue};

/// A wrapped underlying error whose diagnostic fields are selectively
/// imported onto a record.
///
/// Stands in for a platform error whose shape the caller does not control:
/// the typed slots cover the diagnostics the record knows by name, and
/// `fields` carries whatever else the cause happened to have. Import is by
/// key presence, bounded only by what the cause actually carries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cause {
    /// Error name; when absent the record keeps its generic default.
    pub name: Option<String>,
    /// Human-readable description. Required: a cause without a message has
    /// nothing to attribute.
    pub message: String,
    /// Stack text, rendered verbatim (after sanitization).
    pub stack: Option<String>,
    /// Raw pre-formatted stack, preferred over `stack` when both are set.
    pub raw_stack: Option<String>,
    pub file_name: Option<String>,
    pub line_number: Option<u32>,
    pub column_number: Option<u32>,
    /// Textual description of this cause's own underlying cause.
    pub cause: Option<String>,
    pub code: Option<String>,
    /// Arbitrary extra diagnostics carried by the cause.
    pub fields: FieldMap,
}

impl Cause {
    /// Create a cause with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Cause {
            message: message.into(),
            ..Cause::default()
        }
    }

    /// Build a cause from any standard error.
    ///
    /// The message comes from the error's `Display` form and the nested
    /// cause, when one exists, from `source()`.
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        Cause {
            message: error.to_string(),
            cause: error.source().map(ToString::to_string),
            ..Cause::default()
        }
    }

    /// Set the error name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the stack text.
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Set the raw pre-formatted stack.
    #[must_use]
    pub fn with_raw_stack(mut self, raw_stack: impl Into<String>) -> Self {
        self.raw_stack = Some(raw_stack.into());
        self
    }

    /// Set the originating file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Set the originating line number.
    #[must_use]
    pub fn with_line_number(mut self, line_number: u32) -> Self {
        self.line_number = Some(line_number);
        self
    }

    /// Set the originating column number.
    #[must_use]
    pub fn with_column_number(mut self, column_number: u32) -> Self {
        self.column_number = Some(column_number);
        self
    }

    /// Set the textual nested cause.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Set the error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach an arbitrary diagnostic field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key, value);
        self
    }
}

/// The canonical options bag every constructor shape normalizes into.
///
/// Defaults: `show_stack` off, `show_properties` on, everything else absent.
/// Also serves as the descriptor for the object-only construction shape,
/// where one fully-formed bag replaces positional arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorOptions {
    pub plugin: Option<String>,
    pub name: Option<String>,
    pub message: Option<String>,
    pub show_stack: bool,
    pub show_properties: bool,
    pub stack: Option<String>,
    pub file_name: Option<String>,
    pub line_number: Option<u32>,
    pub column_number: Option<u32>,
    pub cause: Option<String>,
    pub code: Option<String>,
    /// Wrapped cause, consumed by the importer before the merge step.
    pub error: Option<Cause>,
    /// Arbitrary named fields. Only allow-listed keys survive the merge;
    /// the rest are dropped silently.
    pub fields: FieldMap,
}

impl Default for ErrorOptions {
    fn default() -> Self {
        ErrorOptions {
            plugin: None,
            name: None,
            message: None,
            show_stack: false,
            show_properties: true,
            stack: None,
            file_name: None,
            line_number: None,
            column_number: None,
            cause: None,
            code: None,
            error: None,
            fields: FieldMap::new(),
        }
    }
}

impl ErrorOptions {
    /// Create a bag with default visibility flags and nothing else set.
    pub fn new() -> Self {
        ErrorOptions::default()
    }

    /// Set the plugin name.
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugin = Some(plugin.into());
        self
    }

    /// Set the error name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set whether the rendered form includes the stack section.
    #[must_use]
    pub fn with_show_stack(mut self, show_stack: bool) -> Self {
        self.show_stack = show_stack;
        self
    }

    /// Set whether the rendered form includes the detail section.
    #[must_use]
    pub fn with_show_properties(mut self, show_properties: bool) -> Self {
        self.show_properties = show_properties;
        self
    }

    /// Set the stack text.
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Set the originating file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Set the originating line number.
    #[must_use]
    pub fn with_line_number(mut self, line_number: u32) -> Self {
        self.line_number = Some(line_number);
        self
    }

    /// Set the originating column number.
    #[must_use]
    pub fn with_column_number(mut self, column_number: u32) -> Self {
        self.column_number = Some(column_number);
        self
    }

    /// Set the textual cause.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Set the error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach a wrapped cause for the importer to consume.
    #[must_use]
    pub fn with_error(mut self, error: Cause) -> Self {
        self.error = Some(error);
        self
    }

    /// Attach an arbitrary named field (subject to the merge allow-list).
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key, value);
        self
    }
}
