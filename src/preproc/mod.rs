//! External preprocessor invocation.
//!
//! Produces the macro- and include-expanded view of the sketch that tag
//! extraction runs against. The sketch source is materialized under the
//! build directory, the preprocessor writes its output (with line markers)
//! to a fixed target file, and both are cleaned up when the build ends.

pub mod filter;

use crate::config::ToolchainConfig;
use crate::errors::{Error, Result, ToolStage};
use crate::pipeline::PipelineInput;
use crate::tools::{TempGuard, ToolRunner};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

/// Subdirectory holding the materialized sketch source
pub const SKETCH_DIR: &str = "sketch";
/// Subdirectory holding preprocessing intermediates
pub const PREPROC_DIR: &str = "preproc";
/// Fixed name of the expanded output file
pub const EXPANDED_FILE: &str = "expanded.cpp";

/// Macro- and include-expanded view of the sketch
#[derive(Debug, Clone)]
pub struct ExpandedSource {
    /// Expanded text, line markers included
    pub text: String,
    /// Path the concatenated sketch was materialized at for the tool run;
    /// line markers in `text` reference it
    pub sketch_file: PathBuf,
}

/// Run the configured preprocessor over the sketch source.
///
/// Fails with [`Error::ToolInvocation`] when the tool exits non-zero; the
/// tool's stderr is carried verbatim so the user sees the real compiler
/// diagnostic (missing header, bad directive) rather than a pipeline error.
pub fn run_preprocessor(
    runner: &dyn ToolRunner,
    config: &ToolchainConfig,
    input: &PipelineInput,
    guard: &mut TempGuard,
) -> Result<ExpandedSource> {
    let preprocessor = config.preprocessor_path()?;

    let sketch_dir = input.build_dir.join(SKETCH_DIR);
    let preproc_dir = input.build_dir.join(PREPROC_DIR);
    fs::create_dir_all(&sketch_dir)?;
    fs::create_dir_all(&preproc_dir)?;

    let main_name = input
        .main_file
        .file_name()
        .ok_or_else(|| Error::Config(format!("main file has no name: {}", input.main_file.display())))?;
    let sketch_file = sketch_dir.join(format!("{}.cpp", main_name.to_string_lossy()));
    fs::write(&sketch_file, &input.source)?;
    guard.track(&sketch_file);

    let target = preproc_dir.join(EXPANDED_FILE);
    guard.track(&target);

    let mut args: Vec<OsString> = config
        .preprocessor_flags
        .iter()
        .map(OsString::from)
        .collect();
    for dir in &input.include_dirs {
        args.push(format!("-I{}", dir.display()).into());
    }
    args.extend(config.extra_flags.iter().map(OsString::from));
    args.push("-o".into());
    args.push(target.clone().into());
    args.push(sketch_file.clone().into());

    log::debug!(
        "running preprocessor {} with {} include folders",
        preprocessor.display(),
        input.include_dirs.len()
    );

    let output = runner
        .run(&preprocessor, &args, &input.build_dir)
        .map_err(|source| Error::ToolSpawn {
            stage: ToolStage::Preprocessor,
            source,
        })?;

    if !output.success() {
        return Err(Error::tool_failure(
            ToolStage::Preprocessor,
            output.exit_code.unwrap_or(-1),
            output.stderr,
        ));
    }

    let text = fs::read_to_string(&target)?;
    Ok(ExpandedSource { text, sketch_file })
}
