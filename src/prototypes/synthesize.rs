//! Prototype block composition and insertion-point selection.
//!
//! All prototypes for one build share a single anchor at the top of the
//! translation unit, so every function sees every prototype regardless of
//! call order. The anchor sits after any leading directives, comments, and
//! blank lines, before the first real statement.

use crate::prototypes::classifier::FunctionCandidate;
use crate::source::quote_for_directive;
use std::path::Path;

/// Where the prototype block lands, and its text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrototypeInsertion {
    /// 1-based line in the original source the block is spliced before
    pub line: usize,
    /// Block lines, in order: per-prototype markers, prototypes, and the
    /// trailing reset directive
    pub block: Vec<String>,
}

/// Compose the insertion batch for a build. Returns `None` when there is
/// nothing to insert, leaving the source untouched.
pub fn compose_insertion(
    candidates: &[FunctionCandidate],
    main_file: &Path,
    source: &str,
) -> Option<PrototypeInsertion> {
    if candidates.is_empty() {
        return None;
    }

    let anchor = insertion_point(source);
    let quoted = quote_for_directive(main_file);

    let mut block = Vec::with_capacity(candidates.len() * 2 + 1);
    for candidate in candidates {
        // A diagnostic against the prototype should point at the definition
        block.push(format!("#line {} {}", candidate.line, quoted));
        block.push(candidate.prototype.clone());
    }
    // Reset numbering so the first original line after the block keeps its
    // user-visible number
    block.push(format!("#line {anchor} {quoted}"));

    Some(PrototypeInsertion {
        line: anchor,
        block,
    })
}

/// 1-based line of the first non-trivial line: not blank, not comment-only,
/// not a preprocessor directive (continuation lines included)
pub fn insertion_point(source: &str) -> usize {
    let mut in_block_comment = false;
    let mut continued_directive = false;

    for (idx, raw) in source.lines().enumerate() {
        if continued_directive {
            continued_directive = raw.trim_end().ends_with('\\');
            continue;
        }
        let code = strip_comments(raw, &mut in_block_comment);
        let trimmed = code.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('#') {
            continued_directive = raw.trim_end().ends_with('\\');
            continue;
        }
        return idx + 1;
    }

    source.lines().count() + 1
}

/// Remove comments from one line, tracking block-comment state across lines.
/// String and character literals are left intact.
fn strip_comments(line: &str, in_block_comment: &mut bool) -> String {
    let mut out = String::new();
    let mut chars = line.chars().peekable();
    let mut in_string = false;
    let mut in_char_lit = false;

    while let Some(c) = chars.next() {
        if *in_block_comment {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                *in_block_comment = false;
            }
            continue;
        }
        if in_string || in_char_lit {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if in_string && c == '"' {
                in_string = false;
            } else if in_char_lit && c == '\'' {
                in_char_lit = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '\'' => {
                in_char_lit = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => break,
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                *in_block_comment = true;
            }
            _ => out.push(c),
        }
    }
    out
}
