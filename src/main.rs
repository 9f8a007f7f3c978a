use anyhow::{Context, Result};
use clap::Parser;
use sketchprep::cli::Cli;
use sketchprep::{preprocess_sketch, PipelineInput, SystemToolRunner, ToolchainConfig};
use std::fs;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    let config = match &cli.config {
        Some(path) => ToolchainConfig::load(path)?,
        None => ToolchainConfig::default(),
    };

    let source = fs::read_to_string(&cli.sketch)
        .with_context(|| format!("Failed to read sketch: {}", cli.sketch.display()))?;

    let input = PipelineInput {
        build_dir: cli.build_dir.clone(),
        include_dirs: cli.include_dirs.clone(),
        source,
        main_file: cli.sketch.clone(),
    };

    let runner = SystemToolRunner::new();
    let rewritten = preprocess_sketch(&input, &config, &runner)?;

    match &cli.output {
        Some(path) => fs::write(path, rewritten)
            .with_context(|| format!("Failed to write output: {}", path.display()))?,
        None => print!("{rewritten}"),
    }

    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .init();
}
