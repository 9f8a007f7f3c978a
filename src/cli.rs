use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sketchprep")]
#[command(about = "Insert function prototypes into a sketch translation unit", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Concatenated sketch source file
    pub sketch: PathBuf,

    /// Include search folder passed to the preprocessor (repeatable)
    #[arg(short = 'I', long = "include-dir", value_name = "DIR")]
    pub include_dirs: Vec<PathBuf>,

    /// Build directory for intermediate files
    #[arg(long, default_value = ".sketchprep")]
    pub build_dir: PathBuf,

    /// Toolchain configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}
