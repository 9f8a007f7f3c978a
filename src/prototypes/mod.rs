//! Prototype classification, synthesis, and source rewriting.

pub mod classifier;
pub mod rewrite;
pub mod synthesize;

pub use classifier::{classify_tags, FunctionCandidate};
pub use rewrite::rewrite_source;
pub use synthesize::{compose_insertion, insertion_point, PrototypeInsertion};
