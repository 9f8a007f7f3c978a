//! Shared error types for the preprocessing pipeline

use std::fmt;
use thiserror::Error;

/// Pipeline stage that owns an external tool invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolStage {
    Preprocessor,
    TagExtractor,
}

impl fmt::Display for ToolStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolStage::Preprocessor => write!(f, "preprocessor"),
            ToolStage::TagExtractor => write!(f, "tag extractor"),
        }
    }
}

/// Main error type for sketch preprocessing operations
#[derive(Debug, Error)]
pub enum Error {
    /// An external tool exited with failure. The tool's own diagnostic text
    /// is carried verbatim so the user sees the real compiler message.
    #[error("{stage} failed (exit code {exit_code}):\n{diagnostics}")]
    ToolInvocation {
        stage: ToolStage,
        exit_code: i32,
        diagnostics: String,
    },

    /// An external tool could not be started at all
    #[error("{stage} could not be started: {source}")]
    ToolSpawn {
        stage: ToolStage,
        #[source]
        source: std::io::Error,
    },

    /// Internal invariant violation while splicing prototypes
    #[error("prototype rewrite failed: {reason}")]
    Rewrite { reason: String },

    /// A malformed tag record. Recoverable: callers log and skip it.
    #[error("malformed tag record: {record}")]
    TagParse { record: String },

    /// Toolchain configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a tool-failure error preserving the tool's diagnostics
    pub fn tool_failure(stage: ToolStage, exit_code: i32, diagnostics: impl Into<String>) -> Self {
        Self::ToolInvocation {
            stage,
            exit_code,
            diagnostics: diagnostics.into(),
        }
    }

    /// Create a rewrite invariant-violation error
    pub fn rewrite(reason: impl Into<String>) -> Self {
        Self::Rewrite {
            reason: reason.into(),
        }
    }

    /// Create a malformed-record error
    pub fn tag_parse(record: impl Into<String>) -> Self {
        Self::TagParse {
            record: record.into(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
