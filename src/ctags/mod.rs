//! Tag extractor invocation.
//!
//! Runs the external symbol scanner over the filtered buffer. The scanner is
//! best-effort: it honors line markers (so tag line numbers refer to the
//! original sketch), and it occasionally emits partial records for complex
//! template syntax, which the parser skips with a warning.

pub mod parser;

pub use parser::{parse_tag_records, RawTag, TagKind};

use crate::config::ToolchainConfig;
use crate::errors::{Error, Result, ToolStage};
use crate::preproc::filter::FilteredSource;
use crate::preproc::PREPROC_DIR;
use crate::tools::{TempGuard, ToolRunner};
use std::ffi::OsString;
use std::fs;
use std::path::Path;

/// Fixed name of the file the tag extractor scans
pub const TAGS_TARGET_FILE: &str = "tags_target.cpp";

// Record-oriented output on stdout, C++ forced, struct/variable/prototype/
// function kinds, full field set, line markers honored.
const TAG_EXTRACTOR_FLAGS: [&str; 7] = [
    "-u",
    "--language-force=c++",
    "-f",
    "-",
    "--c++-kinds=svpf",
    "--fields=KSTtzns",
    "--line-directives",
];

/// Run the tag extractor over the filtered buffer and parse its records.
///
/// Malformed records are skipped with a warning; only process failure is
/// fatal.
pub fn run_tag_extractor(
    runner: &dyn ToolRunner,
    config: &ToolchainConfig,
    build_dir: &Path,
    filtered: &FilteredSource,
    guard: &mut TempGuard,
) -> Result<Vec<RawTag>> {
    let extractor = config.tag_extractor_path()?;

    let preproc_dir = build_dir.join(PREPROC_DIR);
    fs::create_dir_all(&preproc_dir)?;
    let target = preproc_dir.join(TAGS_TARGET_FILE);
    fs::write(&target, filtered.text())?;
    guard.track(&target);

    let mut args: Vec<OsString> = TAG_EXTRACTOR_FLAGS.iter().map(OsString::from).collect();
    args.push(target.clone().into());

    log::debug!("running tag extractor {}", extractor.display());

    let output = runner
        .run(&extractor, &args, build_dir)
        .map_err(|source| Error::ToolSpawn {
            stage: ToolStage::TagExtractor,
            source,
        })?;

    if !output.success() {
        return Err(Error::tool_failure(
            ToolStage::TagExtractor,
            output.exit_code.unwrap_or(-1),
            output.stderr,
        ));
    }

    Ok(parse_tag_records(&output.stdout))
}
