//! Frame sinks that write artifacts to disk.
//!
//! - [`HtmlPlayer`]: interactive looping display
//! - [`AnimatedSvgExporter`]: looping animated image
//! - [`write_still`]: a single frame as a standalone SVG
//!
//! All of them stage their output and only move it into place once complete.

pub mod animated;
pub mod player;
mod staged;

pub use animated::AnimatedSvgExporter;
pub use player::HtmlPlayer;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::render::svg::Document;
use crate::render::Scene;
use staged::StagedFile;

/// Writes one scene as a standalone SVG image.
pub fn write_still(scene: &Scene, path: impl AsRef<Path>) -> Result<PathBuf> {
    let mut file = StagedFile::create(path.as_ref())?;
    file.write(Document(scene))?;
    let path = file.commit()?;
    info!(path = %path.display(), "wrote still frame");
    Ok(path)
}
