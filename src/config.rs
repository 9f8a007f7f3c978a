//! Toolchain configuration for the preprocessing pipeline

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Paths and flags for the external tools the pipeline invokes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Preprocessor executable. Bare names are resolved through PATH.
    #[serde(default = "default_preprocessor")]
    pub preprocessor: PathBuf,

    /// Tag extractor executable. Bare names are resolved through PATH.
    #[serde(default = "default_tag_extractor")]
    pub tag_extractor: PathBuf,

    /// Flags selecting preprocess-only C++ mode
    #[serde(default = "default_preprocessor_flags")]
    pub preprocessor_flags: Vec<String>,

    /// Extra flags appended to every preprocessor invocation
    #[serde(default)]
    pub extra_flags: Vec<String>,
}

fn default_preprocessor() -> PathBuf {
    PathBuf::from("gcc")
}

fn default_tag_extractor() -> PathBuf {
    PathBuf::from("ctags")
}

fn default_preprocessor_flags() -> Vec<String> {
    ["-x", "c++", "-w", "-E"].map(String::from).to_vec()
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            preprocessor: default_preprocessor(),
            tag_extractor: default_tag_extractor(),
            preprocessor_flags: default_preprocessor_flags(),
            extra_flags: Vec::new(),
        }
    }
}

impl ToolchainConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid config {}: {}", path.display(), e)))
    }

    /// Resolve the preprocessor executable, searching PATH for bare names
    pub fn preprocessor_path(&self) -> Result<PathBuf> {
        resolve_tool(&self.preprocessor)
    }

    /// Resolve the tag extractor executable, searching PATH for bare names
    pub fn tag_extractor_path(&self) -> Result<PathBuf> {
        resolve_tool(&self.tag_extractor)
    }
}

fn resolve_tool(tool: &Path) -> Result<PathBuf> {
    // Anything with a directory component is taken as given
    if tool.components().count() > 1 {
        return Ok(tool.to_path_buf());
    }
    which::which(tool).map_err(|e| Error::Config(format!("{} not found: {}", tool.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_targets_gcc_and_ctags() {
        let config = ToolchainConfig::default();
        assert_eq!(config.preprocessor, PathBuf::from("gcc"));
        assert_eq!(config.tag_extractor, PathBuf::from("ctags"));
        assert_eq!(config.preprocessor_flags, vec!["-x", "c++", "-w", "-E"]);
        assert!(config.extra_flags.is_empty());
    }

    #[test]
    fn loads_partial_config_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("toolchain.toml");
        fs::write(
            &path,
            r#"
preprocessor = "/opt/avr/bin/avr-gcc"
extra_flags = ["-DARDUINO=100"]
"#,
        )
        .unwrap();

        let config = ToolchainConfig::load(&path).unwrap();
        assert_eq!(config.preprocessor, PathBuf::from("/opt/avr/bin/avr-gcc"));
        assert_eq!(config.tag_extractor, PathBuf::from("ctags"));
        assert_eq!(config.extra_flags, vec!["-DARDUINO=100"]);
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("toolchain.toml");
        fs::write(&path, "preprocessor = [not toml").unwrap();

        let result = ToolchainConfig::load(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn explicit_paths_bypass_path_lookup() {
        let resolved = resolve_tool(Path::new("/opt/avr/bin/avr-gcc")).unwrap();
        assert_eq!(resolved, PathBuf::from("/opt/avr/bin/avr-gcc"));
    }
}
