use anyhow::Context;
use clap::Parser;
use ppm2png::{
    convert::{convert_dir, log_level},
    EncoderOptions,
};
use std::path::PathBuf;

/// Convert every .ppm file in a folder to PNG and write a JSON report.
#[derive(Parser, Debug)]
struct Args {
    /// Folder containing the .ppm files
    dir: PathBuf,

    /// Where the PNGs and report go (defaults to DIR)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// -v for progress, -vv for chunk details
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    pretty_env_logger::formatted_builder()
        .filter_level(log_level(args.verbose))
        .init();

    let output_dir = args.out.as_deref().unwrap_or(&args.dir);
    let report = convert_dir(&args.dir, output_dir, &EncoderOptions::default())
        .with_context(|| format!("Failed to convert {}", args.dir.display()))?;
    anyhow::ensure!(
        report.failed.is_empty(),
        "{} of {} image(s) failed to convert",
        report.failed.len(),
        report.failed.len() + report.converted.len()
    );
    Ok(())
}
