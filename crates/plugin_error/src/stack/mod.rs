//! Stack capture and sanitization.
//!
//! A record either carries a caller-supplied stack string verbatim or, when
//! none was supplied, a backtrace captured at construction time. Before
//! rendering, every line naming an internal runtime frame is removed.

use std::fmt::Write;

use tracing::trace;

/// Substrings that mark a stack line as an internal runtime frame.
///
/// Matching lines are dropped by [`sanitize`] so rendered stacks show only
/// frames a plugin author can act on.
pub(crate) const INTERNAL_FRAME_MARKERS: &[&str] = &[
    "std::",
    "core::",
    "alloc::",
    "backtrace::",
    "plugin_error::stack::",
    "__rust",
    "rust_begin_unwind",
    "__libc_start_main",
    "_start",
];

/// Remove every internal-runtime line from a stack string.
///
/// Idempotent: sanitizing already-sanitized text returns it unchanged.
pub(crate) fn sanitize(stack: &str) -> String {
    stack
        .lines()
        .filter(|line| {
            !INTERNAL_FRAME_MARKERS
                .iter()
                .any(|marker| line.contains(marker))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Capture the current backtrace as one `at <frame>` line per symbol.
pub(crate) fn capture() -> String {
    let backtrace = backtrace::Backtrace::new();
    let mut lines = Vec::new();
    for frame in backtrace.frames() {
        for symbol in frame.symbols() {
            let mut line = String::from("at ");
            match symbol.name() {
                Some(name) => {
                    let _ = write!(line, "{name}");
                }
                None => line.push_str("<unknown>"),
            }
            if let (Some(file), Some(lineno)) = (symbol.filename(), symbol.lineno()) {
                let _ = write!(line, " ({}:{lineno})", file.display());
            }
            lines.push(line);
        }
    }
    trace!(frames = lines.len(), "captured construction backtrace");
    lines.join("\n")
}
