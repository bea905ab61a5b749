use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ppm2png::{
    convert::{self, ConvertConfig},
    viewer::SystemViewer,
    EncoderOptions,
};

/// Convert a PPM image to PNG and open it.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    #[arg(short, long, default_value = "image.ppm")]
    input: PathBuf,

    #[arg(short, long, default_value = "image.png")]
    output: PathBuf,

    /// Don't open the PNG once it's written
    #[arg(long)]
    no_view: bool,

    /// zlib compression level
    #[arg(short, long, default_value_t = 9, value_parser = clap::value_parser!(u8).range(0..=10))]
    level: u8,

    /// -v for progress, -vv for chunk details
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    pretty_env_logger::formatted_builder()
        .filter_level(convert::log_level(args.verbose))
        .init();

    let config = ConvertConfig {
        input: args.input,
        output: args.output,
        view: !args.no_view,
        encoder: EncoderOptions {
            compression_level: args.level,
            ..Default::default()
        },
    };
    convert::run(&config, &SystemViewer).with_context(|| {
        format!(
            "Failed to convert {} to {}",
            config.input.display(),
            config.output.display()
        )
    })?;
    Ok(())
}
