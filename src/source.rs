//! Line-tagged source buffers and preprocessor line markers.
//!
//! Everything downstream of the preprocessor needs to know which original
//! file and line a physical line came from. Markers of the form
//! `# <line> "<file>" [flags]` (and the `#line <n> "<file>"` spelling) carry
//! that origin through the expanded buffer.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

// Matches `# 42 "file.cpp" 1 2` and `#line 42 "file.cpp"`.
static LINE_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^#(?:line)?\s+(\d+)\s+"([^"]*)""#).expect("valid marker regex"));

/// A parsed line-preserving directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMarker {
    /// 1-based line number the *next* physical line maps to
    pub line: usize,
    /// Originating file named by the directive
    pub file: PathBuf,
}

/// Parse a preprocessor line marker, if `text` is one
pub fn parse_line_marker(text: &str) -> Option<LineMarker> {
    let captures = LINE_MARKER_RE.captures(text)?;
    let line = captures.get(1)?.as_str().parse().ok()?;
    let file = PathBuf::from(captures.get(2)?.as_str());
    Some(LineMarker { line, file })
}

/// One physical line of an expanded buffer plus its origin
#[derive(Debug, Clone)]
pub struct SourceLine {
    pub text: String,
    /// Originating file identity
    pub file: PathBuf,
    /// 1-based line number in the originating file
    pub line: usize,
    /// True when the line came from an expanded header, not the sketch
    pub foreign: bool,
}

impl SourceLine {
    pub fn new(text: impl Into<String>, file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            text: text.into(),
            file: file.into(),
            line,
            foreign: false,
        }
    }

    pub fn foreign(text: impl Into<String>, file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            foreign: true,
            ..Self::new(text, file, line)
        }
    }
}

/// Normalize `\r\n` and bare `\r` endings to `\n`
pub fn normalize_line_endings(source: &str) -> String {
    source.replace("\r\n", "\n").replace('\r', "\n")
}

/// Quote a path for use inside a `#line` directive
pub fn quote_for_directive(path: &Path) -> String {
    let text = path.to_string_lossy();
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_gcc_style_marker() {
        let marker = parse_line_marker(r#"# 1 "/tmp/build/sketch/blink.ino.cpp""#).unwrap();
        assert_eq!(marker.line, 1);
        assert_eq!(marker.file, PathBuf::from("/tmp/build/sketch/blink.ino.cpp"));
    }

    #[test]
    fn parses_marker_with_flags() {
        let marker = parse_line_marker(r#"# 12 "/usr/include/stdio.h" 1 3 4"#).unwrap();
        assert_eq!(marker.line, 12);
        assert_eq!(marker.file, PathBuf::from("/usr/include/stdio.h"));
    }

    #[test]
    fn parses_line_directive_spelling() {
        let marker = parse_line_marker(r#"#line 7 "blink.ino""#).unwrap();
        assert_eq!(marker.line, 7);
        assert_eq!(marker.file, PathBuf::from("blink.ino"));
    }

    #[test]
    fn rejects_non_marker_lines() {
        assert!(parse_line_marker("#include <Servo.h>").is_none());
        assert!(parse_line_marker("#define LED 13").is_none());
        assert!(parse_line_marker("int x = 1;").is_none());
        assert!(parse_line_marker("# comment-looking line").is_none());
    }

    #[test]
    fn normalizes_crlf_and_bare_cr() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn quotes_directive_paths() {
        assert_eq!(
            quote_for_directive(Path::new("/tmp/my sketch/blink.ino")),
            r#""/tmp/my sketch/blink.ino""#
        );
    }
}
