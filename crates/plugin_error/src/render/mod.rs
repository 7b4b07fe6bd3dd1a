//! Rendering the record into its human-oriented multi-section form.
//!
//! Assembly order: signature line, message block, optional detail section,
//! optional stack section. Each section is gated by its visibility flag and
//! empty-safe, so no bare header is ever emitted. Rendering re-reads the
//! record on every call; there are no construction-time snapshots apart from
//! stack sanitization, which is write-back and idempotent.

use std::fmt::{self, Write};

use crate::field::IGNORED_FIELDS;
use crate::record::PluginError;
use crate::stack;

/// ANSI color codes for the two-token signature highlight.
mod colors {
    pub const RED: &str = "\x1b[1;31m"; // Bold red
    pub const CYAN: &str = "\x1b[1;36m"; // Bold cyan
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for rendered reports.
///
/// Styling is an explicit opt-in: [`std::fmt::Display`] and
/// [`PluginError::to_report`] always emit plain text, so non-terminal log
/// sinks never receive ANSI escape sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean based on terminal detection.
    ///
    /// For `Auto` mode, `is_tty` determines whether colors should be used.
    /// This parameter is ignored for `Always` and `Never` modes.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl PluginError {
    /// The signature line: `<name> in plugin "<plugin>"`.
    fn signature(&self, colors: bool) -> String {
        if colors {
            format!(
                "{red}{name}{reset} in plugin \"{cyan}{plugin}{reset}\"",
                red = colors::RED,
                cyan = colors::CYAN,
                reset = colors::RESET,
                name = self.name,
                plugin = self.plugin,
            )
        } else {
            format!("{} in plugin \"{}\"", self.name, self.plugin)
        }
    }

    /// The message block plus the detail section.
    pub fn format_message(&self) -> String {
        let mut out = format!("Message:\n    {}", self.message);
        out.push_str(&self.format_properties());
        out
    }

    /// The detail section, or the empty string when there is nothing to show.
    ///
    /// Collects the typed diagnostic slots that are set, then every extra
    /// field whose key is not ignored and whose value is not null. Re-reads
    /// the record at call time, so fields attached after construction are
    /// included.
    pub fn format_properties(&self) -> String {
        if !self.show_properties {
            return String::new();
        }

        let mut out = String::new();
        let mut push_line = |key: &str, value: &dyn fmt::Display| {
            if out.is_empty() {
                out.push_str("\nDetails:");
            }
            let _ = write!(out, "\n    {key}: {value}");
        };

        if let Some(file_name) = &self.file_name {
            push_line("file_name", file_name);
        }
        if let Some(line_number) = &self.line_number {
            push_line("line_number", line_number);
        }
        if let Some(column_number) = &self.column_number {
            push_line("column_number", column_number);
        }
        if let Some(cause) = &self.cause {
            push_line("cause", cause);
        }
        if let Some(code) = &self.code {
            push_line("code", code);
        }
        for (key, value) in self.fields.iter() {
            if IGNORED_FIELDS.contains(&key) || value.is_null() {
                continue;
            }
            push_line(key, value);
        }

        out
    }

    /// The stack section, or the empty string unless `show_stack` is on and
    /// a stack value is present.
    ///
    /// Sanitizes the preferred stack slot in place (idempotent), so repeated
    /// renders produce identical output without re-filtering cost growing.
    pub fn format_stack(&mut self) -> String {
        if !self.show_stack {
            return String::new();
        }

        let slot = if self.captured_stack.is_some() {
            &mut self.captured_stack
        } else if self.raw_stack.is_some() {
            &mut self.raw_stack
        } else {
            &mut self.stack
        };
        let Some(text) = slot.as_deref() else {
            return String::new();
        };

        let sanitized = stack::sanitize(text);
        *slot = Some(sanitized.clone());
        format!("\nStack:\n    {sanitized}")
    }

    /// Full plain-text report: signature, message, details, stack.
    pub fn to_report(&mut self) -> String {
        self.render(ColorMode::Never, false)
    }

    /// Full report with the two-token highlight when colors resolve on.
    pub fn render(&mut self, mode: ColorMode, is_tty: bool) -> String {
        let colors = mode.should_use_colors(is_tty);
        let mut out = self.signature(colors);
        out.push('\n');
        out.push_str(&self.format_message());
        out.push_str(&self.format_stack());
        out
    }

    /// The stack slot rendering would use, in preference order.
    fn stack_source(&self) -> Option<&str> {
        self.captured_stack
            .as_deref()
            .or(self.raw_stack.as_deref())
            .or(self.stack.as_deref())
    }
}

/// Plain render without mutation; what generic error handlers see.
///
/// The stack is sanitized on the fly instead of written back, which yields
/// the same text as [`PluginError::format_stack`] since sanitization is
/// idempotent.
impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature(false))?;
        write!(f, "\n{}", self.format_message())?;
        if self.show_stack {
            if let Some(text) = self.stack_source() {
                write!(f, "\nStack:\n    {}", stack::sanitize(text))?;
            }
        }
        Ok(())
    }
}
