//! Tag record parsing.
//!
//! The extractor emits one tab-separated record per symbol:
//!
//! ```text
//! name<TAB>file<TAB>/^code excerpt$/;"<TAB>kind:function<TAB>line:42<TAB>signature:(int x)<TAB>returntype:void
//! ```
//!
//! Records are untrusted hints, not ground truth; anything malformed is
//! reported to the caller as a recoverable parse error.

use crate::errors::{Error, Result};
use std::path::PathBuf;

/// Symbol kind reported by the tag extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// A function definition
    Function,
    /// A standalone function declaration
    Prototype,
    Struct,
    Variable,
    /// Anything this pipeline does not handle
    Unknown,
}

impl TagKind {
    fn from_field(value: &str) -> Self {
        match value {
            "function" => TagKind::Function,
            "prototype" => TagKind::Prototype,
            "struct" => TagKind::Struct,
            "variable" => TagKind::Variable,
            _ => TagKind::Unknown,
        }
    }
}

/// One raw record from the tag extractor
#[derive(Debug, Clone)]
pub struct RawTag {
    pub name: String,
    /// File the extractor attributed the symbol to (marker-aware)
    pub file: PathBuf,
    pub kind: TagKind,
    /// 1-based line in original sketch numbering
    pub line: usize,
    /// First physical line of the definition, as written in the source
    pub code: String,
    /// Parameter list text, parentheses included
    pub signature: Option<String>,
    pub return_type: Option<String>,
    /// Enclosing class/struct/namespace when the symbol is nested
    pub scope: Option<String>,
}

/// Parse the extractor's full output, skipping malformed records with a
/// warning. Metadata pseudo-tags (`!_TAG_…`) are ignored.
pub fn parse_tag_records(output: &str) -> Vec<RawTag> {
    output
        .lines()
        .filter(|row| !row.is_empty() && !row.starts_with("!_TAG_"))
        .filter_map(|row| match parse_record(row) {
            Ok(tag) => Some(tag),
            Err(e) => {
                log::warn!("skipping tag record: {e}");
                None
            }
        })
        .collect()
}

fn parse_record(row: &str) -> Result<RawTag> {
    let fields: Vec<&str> = row.split('\t').collect();
    if fields.len() < 3 {
        return Err(Error::tag_parse(row));
    }

    let mut tag = RawTag {
        name: fields[0].to_string(),
        file: PathBuf::from(fields[1]),
        kind: TagKind::Unknown,
        line: 0,
        code: String::new(),
        signature: None,
        return_type: None,
        scope: None,
    };

    for field in &fields[2..] {
        if let Some(code) = parse_code_excerpt(field) {
            tag.code = code;
        } else if let Some((key, value)) = field.split_once(':') {
            match key {
                "kind" => tag.kind = TagKind::from_field(value),
                "line" => tag.line = value.parse().map_err(|_| Error::tag_parse(row))?,
                "signature" => tag.signature = Some(value.to_string()),
                "returntype" => tag.return_type = Some(value.to_string()),
                "class" | "struct" | "namespace" if !value.is_empty() => {
                    tag.scope = Some(value.to_string());
                }
                _ => {}
            }
        } else if tag.kind == TagKind::Unknown {
            // Older extractors emit the kind bare, without the `kind:` prefix
            tag.kind = TagKind::from_field(field);
        }
    }

    if tag.line == 0 {
        return Err(Error::tag_parse(row));
    }

    Ok(tag)
}

/// Extract the source excerpt from a `/^…$/;"` address field
fn parse_code_excerpt(field: &str) -> Option<String> {
    let inner = field.strip_prefix("/^")?;
    let inner = inner
        .strip_suffix(r#"$/;""#)
        .or_else(|| inner.strip_suffix(r#"/;""#))
        .unwrap_or(inner);
    Some(inner.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_function_record() {
        let row = "setup\t/build/sketch/blink.ino.cpp\t/^void setup() {$/;\"\tkind:function\tline:5\tsignature:()\treturntype:void";
        let tags = parse_tag_records(row);
        assert_eq!(tags.len(), 1);

        let tag = &tags[0];
        assert_eq!(tag.name, "setup");
        assert_eq!(tag.kind, TagKind::Function);
        assert_eq!(tag.line, 5);
        assert_eq!(tag.code, "void setup() {");
        assert_eq!(tag.signature.as_deref(), Some("()"));
        assert_eq!(tag.return_type.as_deref(), Some("void"));
        assert!(tag.scope.is_none());
    }

    #[test]
    fn parses_prototype_record() {
        let row = "bar\t/build/sketch/blink.ino.cpp\t/^int bar(int);$/;\"\tkind:prototype\tline:2\tsignature:(int)\treturntype:int";
        let tags = parse_tag_records(row);
        assert_eq!(tags[0].kind, TagKind::Prototype);
    }

    #[test]
    fn captures_member_scope() {
        let row = "run\tsketch.cpp\t/^  void run() {$/;\"\tkind:function\tline:12\tclass:Motor\tsignature:()\treturntype:void";
        let tags = parse_tag_records(row);
        assert_eq!(tags[0].scope.as_deref(), Some("Motor"));
    }

    #[test]
    fn skips_malformed_records() {
        let output = "garbage with no tabs\nsetup\tsketch.cpp\t/^void setup() {$/;\"\tkind:function\tline:5\tsignature:()\treturntype:void\nname\tfile.cpp\t/^code$/;\"\tkind:function\tsignature:()";
        let tags = parse_tag_records(output);
        // Only the record with a line number survives
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "setup");
    }

    #[test]
    fn skips_metadata_pseudo_tags() {
        let output = "!_TAG_FILE_FORMAT\t2\t/extended format/\nloop\tsketch.cpp\t/^void loop() {$/;\"\tkind:function\tline:9\tsignature:()\treturntype:void";
        let tags = parse_tag_records(output);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "loop");
    }

    #[test]
    fn accepts_bare_kind_field() {
        let row = "setup\tsketch.cpp\t/^void setup() {$/;\"\tfunction\tline:5\tsignature:()\treturntype:void";
        let tags = parse_tag_records(row);
        assert_eq!(tags[0].kind, TagKind::Function);
    }

    #[test]
    fn unknown_kinds_are_preserved_as_unknown() {
        let row = "LED\tsketch.cpp\t/^#define LED 13$/;\"\tkind:macro\tline:1";
        let tags = parse_tag_records(row);
        assert_eq!(tags[0].kind, TagKind::Unknown);
    }
}
