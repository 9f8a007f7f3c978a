//! Sketch preprocessing and function prototype synthesis.
//!
//! Given a concatenated sketch source, this crate produces a compilable
//! translation unit by inserting forward declarations for every
//! user-defined free function, preserving original line numbers for
//! diagnostics. It shells out to a preprocessor for the include-expanded
//! view and to a tag extractor for symbol discovery; both sit behind the
//! [`tools::ToolRunner`] seam so the pipeline is testable without a real
//! toolchain.

pub mod cli;
pub mod config;
pub mod ctags;
pub mod errors;
pub mod pipeline;
pub mod preproc;
pub mod prototypes;
pub mod source;
pub mod tools;

// Re-export the pipeline surface
pub use crate::config::ToolchainConfig;
pub use crate::errors::{Error, Result, ToolStage};
pub use crate::pipeline::{preprocess_sketch, PipelineInput};
pub use crate::tools::{SystemToolRunner, ToolOutput, ToolRunner};

pub use crate::ctags::{RawTag, TagKind};
pub use crate::preproc::filter::{filter_sketch_source, FilteredSource};
pub use crate::prototypes::{classify_tags, FunctionCandidate, PrototypeInsertion};
