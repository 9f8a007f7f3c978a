//! Pipeline orchestration: one build, strict stage sequence.
//!
//! Each stage takes the previous stage's typed output and returns its own;
//! nothing is shared between concurrent builds, so independent sketches can
//! be processed in parallel with disjoint inputs. Failure at any stage
//! aborts the build, and intermediate files are cleaned up on every exit
//! path.

use crate::config::ToolchainConfig;
use crate::ctags::run_tag_extractor;
use crate::errors::Result;
use crate::preproc::filter::filter_sketch_source;
use crate::preproc::run_preprocessor;
use crate::prototypes::{classify_tags, compose_insertion, rewrite_source};
use crate::tools::{TempGuard, ToolRunner};
use std::path::PathBuf;

/// Everything one build needs, owned for the duration of the run
#[derive(Debug, Clone)]
pub struct PipelineInput {
    /// Working directory for intermediate files
    pub build_dir: PathBuf,
    /// Include search folders handed to the preprocessor
    pub include_dirs: Vec<PathBuf>,
    /// Concatenated sketch source
    pub source: String,
    /// User-visible identity of the sketch's main file; names the sketch in
    /// line directives and origin filtering
    pub main_file: PathBuf,
}

/// Run the full pipeline over one sketch and return the rewritten source,
/// ready to hand to the real compiler.
pub fn preprocess_sketch(
    input: &PipelineInput,
    config: &ToolchainConfig,
    runner: &dyn ToolRunner,
) -> Result<String> {
    let mut guard = TempGuard::new();

    log::debug!("preprocessing sketch {}", input.main_file.display());
    let expanded = run_preprocessor(runner, config, input, &mut guard)?;

    let sketch_files = vec![expanded.sketch_file.clone(), input.main_file.clone()];
    let filtered = filter_sketch_source(&expanded.text, &sketch_files);
    debug_assert_eq!(
        filtered.line_count(),
        expanded.text.lines().count(),
        "origin filter must preserve line count"
    );

    let tags = run_tag_extractor(runner, config, &input.build_dir, &filtered, &mut guard)?;
    log::debug!("extracted {} tags", tags.len());

    let candidates = classify_tags(&tags, &filtered);
    log::debug!("{} prototype candidates", candidates.len());

    match compose_insertion(&candidates, &input.main_file, &input.source) {
        Some(insertion) => rewrite_source(&input.source, &insertion),
        None => Ok(input.source.clone()),
    }
}
