//! Output files that only appear once complete.
//!
//! Content goes to `<name>.partial` next to the destination and is renamed
//! into place by `commit`. Dropping an uncommitted file deletes the partial.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Error, Result};

pub(crate) struct StagedFile {
    path: PathBuf,
    staging: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl StagedFile {
    pub(crate) fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let staging = staging_path(&path);
        let file = File::create(&staging).map_err(|e| Error::io(&staging, e))?;
        Ok(Self {
            path,
            staging,
            writer: Some(BufWriter::new(file)),
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn write(&mut self, item: impl Display) -> Result<()> {
        let writer = match self.writer.as_mut() {
            Some(w) => w,
            None => return Err(self.failure("file already closed")),
        };
        if let Err(e) = write!(writer, "{}", item) {
            return Err(self.failure(e));
        }
        Ok(())
    }

    /// Flushes and moves the file to its destination.
    pub(crate) fn commit(mut self) -> Result<PathBuf> {
        let writer = match self.writer.take() {
            Some(w) => w,
            None => return Err(self.failure("file already closed")),
        };
        let file = writer.into_inner().map_err(|e| self.failure(e.error()))?;
        file.sync_all().map_err(|e| self.failure(e))?;
        drop(file);
        fs::rename(&self.staging, &self.path).map_err(|e| self.failure(e))?;
        Ok(self.path.clone())
    }

    fn failure(&self, reason: impl ToString) -> Error {
        Error::Export {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if self.staging.exists() {
            self.writer = None;
            if let Err(e) = fs::remove_file(&self.staging) {
                warn!(path = %self.staging.display(), error = %e, "could not remove partial output");
            }
        }
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}
