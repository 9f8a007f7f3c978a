#![allow(dead_code)]

use sketchprep::{PipelineInput, ToolOutput, ToolRunner, ToolchainConfig};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fake toolchain for pipeline tests: simulates the preprocessor by
/// wrapping the materialized sketch in a line marker, and answers tag
/// extraction with canned records.
pub struct FakeToolchain {
    pub ctags_output: String,
}

impl FakeToolchain {
    pub fn new(ctags_output: impl Into<String>) -> Self {
        Self {
            ctags_output: ctags_output.into(),
        }
    }
}

impl ToolRunner for FakeToolchain {
    fn run(&self, _program: &Path, args: &[OsString], _cwd: &Path) -> io::Result<ToolOutput> {
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        if args.iter().any(|a| a == "-E") {
            let target = args
                .iter()
                .position(|a| a == "-o")
                .map(|i| args[i + 1].clone())
                .expect("preprocessor invocation missing -o");
            let input = args.last().expect("preprocessor invocation missing input");
            let source = fs::read_to_string(input)?;
            fs::write(target, format!("# 1 \"{input}\"\n{source}"))?;
            Ok(ok_output(String::new()))
        } else {
            Ok(ok_output(self.ctags_output.clone()))
        }
    }
}

pub fn ok_output(stdout: String) -> ToolOutput {
    ToolOutput {
        exit_code: Some(0),
        stdout,
        stderr: String::new(),
    }
}

pub struct TestBuild {
    pub dir: TempDir,
    pub input: PipelineInput,
    pub config: ToolchainConfig,
}

pub fn build_input(source: &str) -> TestBuild {
    let dir = TempDir::new().unwrap();
    let input = PipelineInput {
        build_dir: dir.path().to_path_buf(),
        include_dirs: Vec::new(),
        source: source.to_string(),
        main_file: PathBuf::from("blink.ino"),
    };
    // Paths with a directory component skip PATH lookup; the fake runner
    // never actually executes them
    let config = ToolchainConfig {
        preprocessor: PathBuf::from("./fake/gcc"),
        tag_extractor: PathBuf::from("./fake/ctags"),
        ..Default::default()
    };
    TestBuild { dir, input, config }
}

pub fn function_record(name: &str, line: usize, sig: &str, ret: &str, code: &str) -> String {
    format!(
        "{name}\ttags_target.cpp\t/^{code}$/;\"\tkind:function\tline:{line}\tsignature:{sig}\treturntype:{ret}"
    )
}

pub fn prototype_record(name: &str, line: usize, sig: &str, ret: &str) -> String {
    format!(
        "{name}\ttags_target.cpp\t/^{ret} {name}{sig};$/;\"\tkind:prototype\tline:{line}\tsignature:{sig}\treturntype:{ret}"
    )
}

pub fn member_record(name: &str, line: usize, sig: &str, ret: &str, class: &str) -> String {
    format!(
        "{name}\ttags_target.cpp\t/^  {ret} {name}{sig} {{$/;\"\tkind:function\tline:{line}\tclass:{class}\tsignature:{sig}\treturntype:{ret}"
    )
}
