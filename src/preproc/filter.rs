//! Sketch-origin filtering of expanded output.
//!
//! The expanded buffer interleaves spans that came from the user's sketch
//! with spans pulled in from system headers. Tag extraction must only see
//! the former, but line counts have to survive exactly: the extractor maps
//! tags back to original sketch lines through the markers, so every physical
//! line is held in place and foreign content is blanked rather than removed.

use crate::source::{parse_line_marker, SourceLine};
use std::path::{Path, PathBuf};

/// Origin of the lines currently being scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// No marker seen yet; lines are assumed sketch-origin
    Unknown,
    InSketch,
    InForeign,
}

/// Expanded buffer reduced to sketch-origin content, line count preserved
#[derive(Debug, Clone)]
pub struct FilteredSource {
    lines: Vec<SourceLine>,
}

impl FilteredSource {
    pub fn lines(&self) -> &[SourceLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Render the filtered buffer as text for the tag extractor
    pub fn text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }

    /// The text of the sketch-origin content line numbered `line` in the
    /// original sketch, if the filter saw one. Marker lines never match.
    pub fn original_line(&self, line: usize) -> Option<&str> {
        self.lines
            .iter()
            .filter(|l| !l.foreign && parse_line_marker(&l.text).is_none())
            .find(|l| l.line == line)
            .map(|l| l.text.as_str())
    }
}

/// Filter the expanded buffer down to sketch-origin lines.
///
/// Marker lines are kept verbatim (the tag extractor honors them for line
/// numbering); content lines attributed to any file outside `sketch_files`
/// are replaced with empty placeholders. Header-guard re-entry into a sketch
/// file restores sketch status when its marker reports it.
pub fn filter_sketch_source(expanded: &str, sketch_files: &[PathBuf]) -> FilteredSource {
    let mut state = Origin::Unknown;
    let mut current_file: PathBuf = sketch_files.first().cloned().unwrap_or_default();
    let mut current_line: usize = 1;
    let mut lines = Vec::new();

    for text in expanded.lines() {
        if let Some(marker) = parse_line_marker(text) {
            state = if is_sketch_file(&marker.file, sketch_files) {
                Origin::InSketch
            } else {
                Origin::InForeign
            };
            current_file = marker.file;
            // The marker names the line of the *next* content line
            current_line = marker.line;
            lines.push(SourceLine::new(text, current_file.clone(), current_line));
            continue;
        }

        match state {
            Origin::Unknown | Origin::InSketch => {
                lines.push(SourceLine::new(text, current_file.clone(), current_line));
            }
            Origin::InForeign => {
                lines.push(SourceLine::foreign("", current_file.clone(), current_line));
            }
        }
        current_line += 1;
    }

    FilteredSource { lines }
}

fn is_sketch_file(file: &Path, sketch_files: &[PathBuf]) -> bool {
    sketch_files.iter().any(|s| s.as_path() == file)
}
