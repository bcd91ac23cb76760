//! Stack capture for [`ErrorDetails::capture`].
//!
//! The captured stack starts with the error's header line, followed by one
//! `    at {symbol} ({file}:{line})` line per frame, most recent first.
//!
//! [`ErrorDetails::capture`]: crate::ErrorDetails::capture

use std::sync::OnceLock;

use backtrace::BytesOrWideString;
use regex::Regex;

/// Which frames to leave out of a captured stack.
#[derive(Copy, Clone, Debug)]
pub struct StackFilter {
    /// Crates whose frames are dropped from the top of the stack, before the
    /// first frame of interest.
    pub skipped_initial_crates: &'static [&'static str],
    /// Crates whose frames are dropped from the bottom of the stack.
    pub skipped_final_crates: &'static [&'static str],
    /// The maximum number of frames kept.
    pub max_frames: usize,
}

impl Default for StackFilter {
    fn default() -> Self {
        Self {
            skipped_initial_crates: &["backtrace", "errorfmt", "core", "std", "alloc"],
            skipped_final_crates: &["std", "core", "alloc", "tokio"],
            max_frames: 20,
        }
    }
}

impl StackFilter {
    /// A filter that keeps every frame.
    pub const FULL: Self = Self {
        skipped_initial_crates: &[],
        skipped_final_crates: &[],
        max_frames: usize::MAX,
    };

    /// Returns [`StackFilter::FULL`] when `RUST_BACKTRACE=full` is set, and
    /// the default filter otherwise.
    pub fn new_from_env() -> Self {
        let full = std::env::var_os("RUST_BACKTRACE").is_some_and(|var| var == "full");
        if full { Self::FULL } else { Self::default() }
    }
}

struct StackFrame {
    symbol: String,
    file: String,
    line: Option<u32>,
    crate_name: Option<String>,
}

/// Captures the current stack, rendered below `header`.
pub fn capture(header: &str, filter: &StackFilter) -> String {
    let mut frames: Vec<StackFrame> = Vec::new();
    let mut initial_filtering = !filter.skipped_initial_crates.is_empty();

    backtrace::trace(|frame| {
        backtrace::resolve_frame(frame, |symbol| {
            let (Some(name), Some(file)) = (symbol.name(), symbol.filename_raw()) else {
                return;
            };
            if frames.len() >= filter.max_frames {
                return;
            }

            let crate_name = crate_name(&file);
            if initial_filtering {
                if crate_name
                    .as_deref()
                    .is_some_and(|name| filter.skipped_initial_crates.contains(&name))
                {
                    return;
                }
                initial_filtering = false;
            }

            frames.push(StackFrame {
                symbol: format!("{name:#}"),
                file: file.to_string(),
                line: symbol.lineno(),
                crate_name,
            });
        });
        true
    });

    while frames.last().is_some_and(|frame| {
        frame
            .crate_name
            .as_deref()
            .is_some_and(|name| filter.skipped_final_crates.contains(&name))
    }) {
        frames.pop();
    }

    let mut stack = header.to_owned();
    for frame in &frames {
        stack.push_str("\n    at ");
        stack.push_str(&frame.symbol);
        stack.push_str(" (");
        stack.push_str(&frame.file);
        if let Some(line) = frame.line {
            stack.push(':');
            stack.push_str(&line.to_string());
        }
        stack.push(')');
    }
    stack
}

fn crate_name(file: &BytesOrWideString<'_>) -> Option<String> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        [
            r"(?:/lib/rustlib/src/rust|^/rustc/[0-9a-f]{40})/library/(std|core|alloc)/src/.*$",
            r"/\.cargo/registry/src/[^/]+-[0-9a-f]{16}/([^./]+)-[0-9]+\.[^/]*/src/.*$",
            r"/(errorfmt)/src/.*$",
        ]
        .into_iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
    });

    let path = file.to_string();
    patterns
        .iter()
        .find_map(|pattern| pattern.captures(&path)?.get(1))
        .map(|name| name.as_str().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_filter_from_env_value() {
        let filter = StackFilter::FULL;
        assert!(filter.skipped_initial_crates.is_empty());
        assert_eq!(filter.max_frames, usize::MAX);
    }

    #[test]
    fn test_capture_keeps_header_and_limit() {
        let filter = StackFilter {
            max_frames: 3,
            ..StackFilter::FULL
        };
        let stack = capture("Error: boom", &filter);
        assert!(stack.starts_with("Error: boom"));
        assert!(stack.lines().skip(1).all(|line| line.starts_with("    at ")));
        assert!(stack.lines().count() <= 4);
    }
}
