//! The plugin error record and its construction pipeline.
//!
//! Construction runs a fixed sequence over one canonical options bag:
//! cause import, option merge, validation, then stack capture when nothing
//! supplied a stack. After that the record is live and freely mutable; every
//! render reflects its current state.

use thiserror::Error;
use tracing::trace;

use crate::field::{FieldMap, FieldValue};
use crate::options::{Cause, ErrorOptions};
use crate::stack;

/// Name a record carries when neither options nor a cause supplied one.
const DEFAULT_NAME: &str = "Error";

/// The only failure mode of the system: a required field was absent after
/// normalization and merge. Always fatal to the construction call; no
/// partial record escapes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum ConstructionError {
    #[error("Missing plugin name")]
    MissingPluginName,
    #[error("Missing error message")]
    MissingMessage,
}

/// A tagged, renderable error attributed to a named originating component.
///
/// Fields are public and freely mutable for the record's entire lifetime;
/// detail rendering re-reads them on every call. The two invariants that hold
/// from construction onward: `plugin` and `message` are non-empty (enforced
/// by [`PluginError::validate`]), and both visibility flags are always set.
#[derive(Clone, Debug)]
pub struct PluginError {
    /// Name of the component the failure is attributed to.
    pub plugin: String,
    /// Error name; `"Error"` unless a cause or the options supplied one.
    pub name: String,
    /// Human-readable description.
    pub message: String,
    /// Whether rendering includes the stack section. Off by default.
    pub show_stack: bool,
    /// Whether rendering includes the detail section. On by default.
    pub show_properties: bool,
    /// Caller- or cause-supplied stack text.
    pub stack: Option<String>,
    pub file_name: Option<String>,
    pub line_number: Option<u32>,
    pub column_number: Option<u32>,
    /// Textual description of the underlying cause.
    pub cause: Option<String>,
    pub code: Option<String>,
    /// Extra diagnostic fields, visible in the detail section unless ignored.
    /// Callers append here after construction via [`PluginError::set_field`].
    pub fields: FieldMap,
    /// Raw pre-formatted stack imported from a cause. Preferred over `stack`
    /// when rendering.
    pub(crate) raw_stack: Option<String>,
    /// Backtrace captured at construction when no stack was supplied.
    /// Preferred over both imported slots when rendering.
    pub(crate) captured_stack: Option<String>,
}

impl PluginError {
    /// Construct from a plugin name and a message string.
    pub fn new(
        plugin: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, ConstructionError> {
        Self::with_options(plugin, message, ErrorOptions::default())
    }

    /// Construct from a plugin name, a message string, and an options bag.
    ///
    /// The positional arguments override any `plugin` / `message` already in
    /// the bag.
    pub fn with_options(
        plugin: impl Into<String>,
        message: impl Into<String>,
        mut options: ErrorOptions,
    ) -> Result<Self, ConstructionError> {
        options.plugin = Some(plugin.into());
        options.message = Some(message.into());
        Self::from_options(options)
    }

    /// Construct by wrapping an underlying cause.
    pub fn wrap(plugin: impl Into<String>, cause: Cause) -> Result<Self, ConstructionError> {
        Self::wrap_with_options(plugin, cause, ErrorOptions::default())
    }

    /// Construct by wrapping an underlying cause, with an options bag.
    ///
    /// Explicit options win over cause-derived values for the allow-listed
    /// fields.
    pub fn wrap_with_options(
        plugin: impl Into<String>,
        cause: Cause,
        mut options: ErrorOptions,
    ) -> Result<Self, ConstructionError> {
        options.plugin = Some(plugin.into());
        options.error = Some(cause);
        Self::from_options(options)
    }

    /// Construct from a single fully-formed descriptor.
    ///
    /// The pipeline: cause import, option merge, validation, then stack
    /// capture when neither the options nor the cause supplied one. The bag
    /// is consumed; nothing borrowed from the caller is mutated.
    pub fn from_options(options: ErrorOptions) -> Result<Self, ConstructionError> {
        let mut record = PluginError {
            plugin: String::new(),
            name: DEFAULT_NAME.to_string(),
            message: String::new(),
            show_stack: options.show_stack,
            show_properties: options.show_properties,
            stack: None,
            file_name: None,
            line_number: None,
            column_number: None,
            cause: None,
            code: None,
            fields: FieldMap::new(),
            raw_stack: None,
            captured_stack: None,
        };

        record.import_cause(&options);
        record.merge_options(&options);
        record.validate()?;

        if record.stack.is_none() && record.raw_stack.is_none() {
            record.captured_stack = Some(stack::capture());
        }

        trace!(
            plugin = %record.plugin,
            name = %record.name,
            "constructed plugin error record"
        );
        Ok(record)
    }

    /// Copy fields from the bag's wrapped cause onto this record.
    ///
    /// No-op unless the bag carries a cause. The fixed trio (`message`,
    /// `name`, stack slots) comes first, then the typed diagnostic slots,
    /// then every extra field the cause happens to carry. Extra keys naming
    /// an allow-listed slot are routed into that slot; all others land in
    /// the record's field map unfiltered. This is how diagnostics leak
    /// through from a platform error without a per-field schema.
    pub fn import_cause(&mut self, options: &ErrorOptions) {
        let Some(cause) = &options.error else {
            return;
        };

        self.message.clone_from(&cause.message);
        if let Some(name) = &cause.name {
            self.name.clone_from(name);
        }
        self.stack.clone_from(&cause.stack);
        self.raw_stack.clone_from(&cause.raw_stack);

        if cause.file_name.is_some() {
            self.file_name.clone_from(&cause.file_name);
        }
        if cause.line_number.is_some() {
            self.line_number = cause.line_number;
        }
        if cause.column_number.is_some() {
            self.column_number = cause.column_number;
        }
        if cause.cause.is_some() {
            self.cause.clone_from(&cause.cause);
        }
        if cause.code.is_some() {
            self.code.clone_from(&cause.code);
        }

        for (key, value) in cause.fields.iter() {
            if !self.apply_known_field(key, value) {
                self.fields.insert(key, value.clone());
            }
        }
    }

    /// Copy the allow-listed fields from the bag onto this record,
    /// overwriting anything the cause importer set.
    ///
    /// Named entries in `options.fields` survive only when their key is on
    /// the allow-list; everything else is dropped silently, which keeps
    /// accidental descriptor keys off the record at construction time.
    pub fn merge_options(&mut self, options: &ErrorOptions) {
        if let Some(plugin) = &options.plugin {
            self.plugin.clone_from(plugin);
        }
        if let Some(name) = &options.name {
            self.name.clone_from(name);
        }
        if let Some(message) = &options.message {
            self.message.clone_from(message);
        }
        self.show_stack = options.show_stack;
        self.show_properties = options.show_properties;
        if options.stack.is_some() {
            self.stack.clone_from(&options.stack);
        }
        if options.file_name.is_some() {
            self.file_name.clone_from(&options.file_name);
        }
        if options.line_number.is_some() {
            self.line_number = options.line_number;
        }
        if options.column_number.is_some() {
            self.column_number = options.column_number;
        }
        if options.cause.is_some() {
            self.cause.clone_from(&options.cause);
        }
        if options.code.is_some() {
            self.code.clone_from(&options.code);
        }

        for (key, value) in options.fields.iter() {
            // Unknown keys are dropped here on purpose.
            self.apply_known_field(key, value);
        }
    }

    /// Enforce the two required invariants. Run unconditionally at the end
    /// of every constructor; nothing is re-validated at render time.
    pub fn validate(&self) -> Result<(), ConstructionError> {
        if self.plugin.is_empty() {
            return Err(ConstructionError::MissingPluginName);
        }
        if self.message.is_empty() {
            return Err(ConstructionError::MissingMessage);
        }
        Ok(())
    }

    /// Attach or overwrite an extra diagnostic field.
    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key, value);
    }

    /// Look up an extra diagnostic field.
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Route a dynamic field into its typed slot when the key is on the
    /// allow-list. Returns false for unknown keys so the caller decides
    /// whether to keep or drop them. Un-coercible values are consumed
    /// without effect: formatting must stay total, so a bad value is never
    /// an error.
    fn apply_known_field(&mut self, key: &str, value: &FieldValue) -> bool {
        match key {
            "plugin" => self.plugin = value.to_string(),
            "name" => self.name = value.to_string(),
            "message" => self.message = value.to_string(),
            "show_stack" => {
                if let Some(flag) = value.as_bool() {
                    self.show_stack = flag;
                }
            }
            "show_properties" => {
                if let Some(flag) = value.as_bool() {
                    self.show_properties = flag;
                }
            }
            "stack" => self.stack = Some(value.to_string()),
            "file_name" => self.file_name = Some(value.to_string()),
            "line_number" => {
                if let Some(line) = value.as_int().and_then(|n| u32::try_from(n).ok()) {
                    self.line_number = Some(line);
                }
            }
            "column_number" => {
                if let Some(column) = value.as_int().and_then(|n| u32::try_from(n).ok()) {
                    self.column_number = Some(column);
                }
            }
            "cause" => self.cause = Some(value.to_string()),
            "code" => self.code = Some(value.to_string()),
            _ => return false,
        }
        true
    }
}

impl std::error::Error for PluginError {}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
