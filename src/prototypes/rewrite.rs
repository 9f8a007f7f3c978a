//! Splicing the prototype block into the original sketch source.

use crate::errors::{Error, Result};
use crate::prototypes::synthesize::PrototypeInsertion;
use crate::source::normalize_line_endings;

/// Splice the insertion batch into the original (pre-expansion) source.
///
/// Line endings are normalized to `\n` first. An insertion line outside the
/// buffer is an internal invariant violation, not a user input problem.
pub fn rewrite_source(source: &str, insertion: &PrototypeInsertion) -> Result<String> {
    let normalized = normalize_line_endings(source);
    let rows: Vec<&str> = normalized.split('\n').collect();

    if insertion.line == 0 || insertion.line > rows.len() + 1 {
        return Err(Error::rewrite(format!(
            "insertion line {} outside source of {} lines",
            insertion.line,
            rows.len()
        )));
    }

    let at = insertion.line - 1;
    let mut out: Vec<&str> = Vec::with_capacity(rows.len() + insertion.block.len());
    out.extend(&rows[..at.min(rows.len())]);
    out.extend(insertion.block.iter().map(String::as_str));
    out.extend(&rows[at.min(rows.len())..]);

    Ok(out.join("\n"))
}
