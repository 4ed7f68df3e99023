// config_store.rs
use crate::error::{Error, Result};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Ordered list of executables; position is identity.
pub type AppList = Vec<PathBuf>;

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Missing file means "nothing configured yet". A file that exists but
    /// does not parse is `ConfigCorrupt`, never an empty list.
    pub fn load(&self) -> Result<AppList> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_slice(&bytes).map_err(|source| Error::ConfigCorrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Full overwrite through a temp file in the same directory, renamed into
    /// place so readers see either the old or the new list.
    pub fn save(&self, apps: &[PathBuf]) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| self.io_error(e))?;

        let content = serde_json::to_vec_pretty(apps).map_err(|e| self.io_error(e.into()))?;

        let mut tmp = NamedTempFile::new_in(&parent).map_err(|e| self.io_error(e))?;
        tmp.write_all(&content).map_err(|e| self.io_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        log::debug!("Saved {} app(s) to {}", apps.len(), self.path.display());
        Ok(())
    }

    fn io_error(&self, source: io::Error) -> Error {
        Error::ConfigIo {
            path: self.path.clone(),
            source,
        }
    }
}
