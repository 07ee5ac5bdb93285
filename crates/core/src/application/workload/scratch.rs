// Scratch resources scoped to one workload request
//
// Everything handed out here is removed when dropped, so every exit path of
// the workload (including `?` on an error) releases it.

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tracing::{debug, warn};

use super::adapter::RunConfiguration;
use super::constants::SCRATCH_PREFIX;
use crate::error::Result;

/// Factory for uniquely named temp files, optionally under a fixed parent
#[derive(Debug, Clone, Default)]
pub struct ScratchSpace {
    dir: Option<PathBuf>,
}

impl ScratchSpace {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    fn create(&self, kind: &str, suffix: &str) -> Result<tempfile::NamedTempFile> {
        let prefix = format!("{}{}-", SCRATCH_PREFIX, kind);
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix).suffix(suffix);

        let file = match &self.dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        Ok(file)
    }

    /// Write `config` as YAML to a new temp file
    pub fn write_config(&self, config: &RunConfiguration) -> Result<TempPath> {
        let mut file = self.create("config", ".yaml")?;
        file.write_all(config.to_yaml()?.as_bytes())?;
        file.flush()?;

        debug!(path = %file.path().display(), "Wrote smallfile configuration");
        Ok(file.into_temp_path())
    }

    /// Empty temp file for smallfile's --output-json
    pub fn output_file(&self) -> Result<TempPath> {
        Ok(self.create("results", ".json")?.into_temp_path())
    }
}

/// Directory removed recursively on drop; a missing directory is fine
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed scratch directory"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove scratch directory"
            ),
        }
    }
}
