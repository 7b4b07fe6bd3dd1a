//! Tagged, renderable error records for plugin-style tools.
//!
//! A [`PluginError`] attributes a failure to a named originating component
//! and renders it as a structured multi-section report: a signature line,
//! the message, an optional detail list, and an optional sanitized stack,
//! the last two gated by independent visibility flags.
//!
//! Construction always runs the same pipeline regardless of call shape:
//! normalize into one [`ErrorOptions`] bag, import fields from a wrapped
//! [`Cause`], merge the allow-listed options over them, then validate that
//! `plugin` and `message` are non-empty. The record stays freely mutable
//! afterwards and every render reflects its current state.
//!
//! ```
//! use plugin_error::{ErrorOptions, PluginError};
//!
//! let mut err = PluginError::with_options(
//!     "build",
//!     "compile failed",
//!     ErrorOptions::new().with_code("ERR_COMPILE"),
//! )?;
//! err.set_field("target", "x86_64-unknown-linux-gnu");
//!
//! let report = err.to_report();
//! assert!(report.contains("in plugin \"build\""));
//! assert!(report.contains("target: x86_64-unknown-linux-gnu"));
//! # Ok::<(), plugin_error::ConstructionError>(())
//! ```

mod field;
mod options;
mod record;
mod render;
mod stack;

pub use field::{FieldMap, FieldValue, ALLOWED_FIELDS, IGNORED_FIELDS};
pub use options::{Cause, ErrorOptions};
pub use record::{ConstructionError, PluginError};
pub use render::ColorMode;
