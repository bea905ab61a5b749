use std::{
    ffi::{OsStr, OsString},
    fs,
    path::{Path, PathBuf},
};

use log::{debug, error, info, log_enabled, warn, Level, LevelFilter};
use serde_json::json;
use time::{format_description::well_known::Iso8601, OffsetDateTime};

use crate::{
    chunks::{iter_chunks, strip_signature, Chunk},
    error::Result,
    png::{Encoder, EncoderOptions},
    ppm,
    viewer::Viewer,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Open the written PNG with the viewer afterwards.
    pub view: bool,
    pub encoder: EncoderOptions,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("image.ppm"),
            output: PathBuf::from("image.png"),
            view: true,
            encoder: EncoderOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    pub width: u32,
    pub height: u32,
    pub png_size: usize,
}

/// Converts the configured input, then shows the result. A viewer that fails
/// to start is logged and otherwise ignored.
pub fn run(config: &ConvertConfig, viewer: &dyn Viewer) -> Result<Conversion> {
    let conversion = convert_file(&config.input, &config.output, &config.encoder)?;
    if config.view {
        if let Err(e) = viewer.open(&config.output) {
            warn!("Failed to open {}: {}", config.output.display(), e);
        }
    }
    Ok(conversion)
}

pub fn convert_file(input: &Path, output: &Path, options: &EncoderOptions) -> Result<Conversion> {
    let image = ppm::read(input)?;
    let png = Encoder::new(*options).encode(&image)?;
    if log_enabled!(Level::Debug) {
        log_chunks(&png)?;
    }
    write_atomically(output, &png)?;
    info!(
        "Converted {} ({}x{}) to {} ({} bytes)",
        input.display(),
        image.width(),
        image.height(),
        output.display(),
        png.len()
    );
    Ok(Conversion {
        width: image.width(),
        height: image.height(),
        png_size: png.len(),
    })
}

/// Name of the JSON report [`convert_dir`] leaves in its output directory.
pub const REPORT_FILE: &str = "conversion_results.json";

/// Outcome of converting a directory of PPM files. Images are named by their
/// file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// ISO 8601 UTC time the batch started.
    pub date: String,
    pub converted: Vec<String>,
    /// Stem and error message of every image that failed.
    pub failed: Vec<(String, String)>,
}

impl BatchReport {
    pub fn to_json(&self) -> serde_json::Value {
        let failed: Vec<_> = self
            .failed
            .iter()
            .map(|(image, error)| json!({ "image": image, "error": error }))
            .collect();
        json!({
            "date": self.date,
            "converted": self.converted,
            "failed": failed,
        })
    }
}

/// Converts every `*.ppm` file in `dir`, in name order, to `<stem>.png` in
/// `out`, then writes [`REPORT_FILE`] there. A file that fails to convert is
/// recorded in the report and doesn't stop the batch.
pub fn convert_dir(dir: &Path, out: &Path, options: &EncoderOptions) -> Result<BatchReport> {
    let date = OffsetDateTime::now_utc().format(&Iso8601::DEFAULT)?;
    fs::create_dir_all(out)?;
    let mut sources = vec![];
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension() == Some(OsStr::new("ppm")) {
            sources.push(path);
        }
    }
    sources.sort();

    let mut report = BatchReport {
        date,
        converted: Vec::with_capacity(sources.len()),
        failed: vec![],
    };
    for source in &sources {
        let Some(stem) = source.file_stem().and_then(OsStr::to_str) else {
            warn!("Skipping {}: file name isn't UTF-8", source.display());
            continue;
        };
        let target = out.join(format!("{stem}.png"));
        match convert_file(source, &target, options) {
            Ok(_) => report.converted.push(stem.to_owned()),
            Err(e) => {
                error!("Failed to convert {}: {}", source.display(), e);
                report.failed.push((stem.to_owned(), e.to_string()));
            }
        }
    }

    write_atomically(&out.join(REPORT_FILE), report.to_json().to_string().as_bytes())?;
    Ok(report)
}

/// Log level for a count of `-v` flags: errors only, then progress, then
/// chunk details.
pub fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Error,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

fn log_chunks(png: &[u8]) -> Result<()> {
    for chunk in iter_chunks(strip_signature(png)?) {
        match chunk? {
            Chunk::IHDR(header) => debug!("IHDR {header:?}"),
            Chunk::IDAT(idat) => debug!("IDAT {} bytes", idat.data.len()),
            Chunk::IEND => debug!("IEND"),
            Chunk::Unknown(raw) => debug!(
                "{} {} bytes",
                String::from_utf8_lossy(raw.chunk_type),
                raw.data.len()
            ),
        }
    }
    Ok(())
}

/// Writes next to `path` first and renames into place, so `path` never holds
/// a partially written file.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp = temp_path(path);
    if let Err(e) = fs::write(&temp, bytes).and_then(|()| fs::rename(&temp, path)) {
        let _ = fs::remove_file(&temp);
        return Err(e.into());
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or(OsStr::new("output")));
    name.push(".tmp");
    path.with_file_name(name)
}
