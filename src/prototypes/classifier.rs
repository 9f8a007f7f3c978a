//! Tag classification into prototype candidates.
//!
//! Tag records are hints from a best-effort scanner, never ground truth.
//! The rules here decide which records denote a top-level function
//! definition that needs a synthesized prototype, and build the prototype
//! text. When a record is ambiguous the classifier leans toward emitting a
//! prototype: a spurious declaration is harmless, a missing one breaks the
//! downstream compile.

use crate::ctags::{RawTag, TagKind};
use crate::preproc::filter::FilteredSource;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

// Default-value expressions in parameter lists. A declaration must not
// repeat a default the definition already states, so they are stripped.
static DEFAULT_ARG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*=\s*[^,)]+").expect("valid default-arg regex"));

/// A top-level function definition that may need a prototype
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCandidate {
    pub name: String,
    /// Full prototype line, e.g. `void foo(int x);`
    pub prototype: String,
    /// 1-based definition line in the original sketch
    pub line: usize,
}

/// Classify raw tags into prototype candidates, in first-appearance order.
///
/// Skip rules, in order: nested scope (members never get prototypes), an
/// existing standalone declaration matching by name and parameter arity,
/// and repeated definitions of the same signature.
pub fn classify_tags(tags: &[RawTag], filtered: &FilteredSource) -> Vec<FunctionCandidate> {
    let declared: HashSet<(String, usize)> = tags
        .iter()
        .filter(|t| t.kind == TagKind::Prototype && t.scope.is_none())
        .filter_map(declaration_key)
        .collect();

    let mut emitted = HashSet::new();
    let mut candidates = Vec::new();

    for tag in tags {
        if tag.kind != TagKind::Function {
            continue;
        }
        if let Some(scope) = &tag.scope {
            log::debug!("skipping member function {}::{}", scope, tag.name);
            continue;
        }
        let Some(key) = declaration_key(tag) else {
            log::warn!("no parameter list for function {}, skipping", tag.name);
            continue;
        };
        if declared.contains(&key) {
            log::debug!("{} already has a visible declaration", tag.name);
            continue;
        }
        if !emitted.insert(key) {
            continue;
        }
        let Some(prototype) = prototype_text(tag, filtered) else {
            log::warn!("cannot synthesize a prototype for {}", tag.name);
            continue;
        };
        candidates.push(FunctionCandidate {
            name: tag.name.clone(),
            prototype,
            line: tag.line,
        });
    }

    candidates
}

/// Declaration identity: name plus parameter arity
fn declaration_key(tag: &RawTag) -> Option<(String, usize)> {
    let arity = match tag.signature.as_deref() {
        Some(sig) => parameter_arity(sig),
        None => parameter_arity(params_from_code(&tag.code)?),
    };
    Some((tag.name.clone(), arity))
}

fn params_from_code(code: &str) -> Option<&str> {
    let open = code.find('(')?;
    let close = code.rfind(')')?;
    (close > open).then(|| &code[open..=close])
}

fn parameter_arity(params: &str) -> usize {
    let inner = params.trim();
    let inner = inner.strip_prefix('(').unwrap_or(inner);
    let inner = inner.strip_suffix(')').unwrap_or(inner);
    let inner = inner.trim();
    if inner.is_empty() || inner == "void" {
        return 0;
    }
    // Commas inside template arguments, function-pointer parameters, and
    // array bounds do not separate parameters
    let mut depth = 0i32;
    let mut count = 1;
    for c in inner.chars() {
        match c {
            '(' | '<' | '[' => depth += 1,
            ')' | '>' | ']' => depth -= 1,
            ',' if depth == 0 => count += 1,
            _ => {}
        }
    }
    count
}

fn prototype_text(tag: &RawTag, filtered: &FilteredSource) -> Option<String> {
    let code = tag.code.trim();

    // Single-line template definitions carry everything in the excerpt
    if code.starts_with("template") {
        return prototype_from_code(code);
    }

    // No signature field: fall back to the excerpt rather than give up
    let Some(signature) = tag.signature.as_deref() else {
        return prototype_from_code(code);
    };
    let params = strip_default_args(signature);
    let ret = return_type_text(tag, code)?;
    let base = format!("{ret} {}{params};", tag.name);

    // A template parameter list on the preceding line is carried verbatim
    if tag.line >= 2 {
        if let Some(prev) = filtered.original_line(tag.line - 1) {
            let prev = prev.trim();
            if prev.starts_with("template") && !prev.contains('{') {
                return Some(format!("{prev} {base}"));
            }
        }
    }
    Some(base)
}

/// Derive a prototype directly from the source excerpt: everything up to the
/// body brace (or through the closing parenthesis), defaults stripped
fn prototype_from_code(code: &str) -> Option<String> {
    let head = match code.find('{') {
        Some(i) => code[..i].trim_end(),
        None => &code[..=code.rfind(')')?],
    };
    Some(format!("{};", strip_default_args(head)))
}

// The extractor is known to drop pointer and reference declarators from its
// normalized return type, so the raw source text ahead of the name wins.
fn return_type_text(tag: &RawTag, code: &str) -> Option<String> {
    return_type_from_code(code, &tag.name).or_else(|| tag.return_type.clone())
}

fn return_type_from_code(code: &str, name: &str) -> Option<String> {
    for (idx, _) in code.match_indices(name) {
        let boundary_before = idx == 0
            || !code[..idx]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || c == '_');
        let rest = code[idx + name.len()..].trim_start();
        if boundary_before && rest.starts_with('(') {
            let prefix = code[..idx].trim();
            return (!prefix.is_empty()).then(|| prefix.to_string());
        }
    }
    None
}

fn strip_default_args(params: &str) -> String {
    DEFAULT_ARG_RE.replace_all(params, "").into_owned()
}
