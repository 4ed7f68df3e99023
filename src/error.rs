// error.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The config file exists but is not a JSON array of paths.
    #[error("config file {} is corrupt: {source}", path.display())]
    ConfigCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config file {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("auto-start {op} failed for '{name}': {source}")]
    RegistryAccess {
        op: &'static str,
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to launch {}: {source}", path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("tray indicator: {0}")]
    Tray(String),
}

impl Error {
    pub fn registry(op: &'static str, name: impl Into<String>, source: io::Error) -> Self {
        Error::RegistryAccess {
            op,
            name: name.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
