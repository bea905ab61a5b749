use std::{path::Path, process::Command};

use log::debug;

use crate::error::Result;

/// Something that can show an image file to the user.
pub trait Viewer {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Hands the file to the operating system's default application. Returns as
/// soon as the handler has been spawned.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemViewer;

impl Viewer for SystemViewer {
    fn open(&self, path: &Path) -> Result<()> {
        let program = if cfg!(target_os = "windows") {
            "explorer"
        } else if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        };
        debug!("Opening {} with {program}", path.display());
        Command::new(program).arg(path).spawn()?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoViewer;

impl Viewer for NoViewer {
    fn open(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}
